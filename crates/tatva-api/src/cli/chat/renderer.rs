//! Terminal rendering of replies, listings, search capsules and the map.
//!
//! Everything here is presentation only; session state is read through the
//! orchestrator and never changed.

use comfy_table::{Cell, Color, ContentArrangement, Table, presets};
use console::style;
use serde_json::{Value, json};
use tatva_core::map::boundary::select_shape;
use tatva_core::map::viewport::FitOutcome;
use tatva_core::orchestrator::{RenderReport, TurnOutcome};
use tatva_core::session::label::group_thousands;
use tatva_types::capsule::SearchCapsule;
use tatva_types::map::{OverlayHandle, OverlayShape};
use tatva_types::property::Property;

/// Monthly rent as `₹25,000/mo`.
pub fn format_rent(rent: Option<f64>) -> String {
    match rent {
        Some(r) if r.is_finite() && r >= 0.0 => format!("₹{}/mo", group_thousands(r.round() as u64)),
        _ => "rent on request".to_string(),
    }
}

/// `text` cut to at most `max` characters, with an ellipsis when cut.
pub fn clip(text: &str, max: usize) -> String {
    let text = text.trim();
    if text.chars().count() <= max {
        return text.to_string();
    }
    let cut: String = text.chars().take(max.saturating_sub(1)).collect();
    format!("{}…", cut.trim_end())
}

/// One-line summary of a listing: type, size and rent.
pub fn listing_summary(property: &Property) -> String {
    let mut parts = Vec::new();
    if let Some(kind) = &property.property_type {
        parts.push(kind.clone());
    }
    if let Some(bhk) = property.size_bhk {
        parts.push(format!("{bhk} BHK"));
    }
    if let Some(sqft) = property.total_sqft {
        parts.push(format!("{} sqft", group_thousands(sqft.round() as u64)));
    }
    parts.push(format_rent(property.rent_price_inr_per_month));
    parts.join(" · ")
}

pub fn print_reply(reply: &str) {
    println!();
    let mut lines = reply.lines();
    if let Some(first) = lines.next() {
        println!("  {} {}", style("Tatva >").cyan().bold(), first);
    }
    for line in lines {
        println!("         {line}");
    }
    println!();
}

/// Print the parts of a turn outcome that are not the listings themselves.
pub fn print_outcome(outcome: &TurnOutcome) {
    match outcome {
        TurnOutcome::Failed { message } => {
            eprintln!("\n  {} {message}", style("!").red().bold());
            eprintln!("  {}", style("Type a message to retry, /exit to quit.").dim());
            println!();
        }
        TurnOutcome::NoPayload => {
            println!(
                "\n  {} The assistant had nothing to say. Try rephrasing.\n",
                style("?").yellow().bold()
            );
        }
        TurnOutcome::Stale { reply } => {
            print_reply(reply);
            println!(
                "  {}",
                style("(results from an older request were ignored)").dim()
            );
        }
        TurnOutcome::Conversational { reply } | TurnOutcome::CapsuleCreated { reply, .. } => {
            print_reply(reply);
        }
    }
}

pub fn print_properties(properties: &[&Property], category: &str) {
    if properties.is_empty() {
        println!(
            "  {} No listings match {}.",
            style("i").blue().bold(),
            style(category).yellow()
        );
        println!();
        return;
    }

    for (i, property) in properties.iter().enumerate() {
        println!(
            "  {} {}  {}",
            style(format!("{:>2}.", i + 1)).dim(),
            style(property.display_name()).bold(),
            listing_summary(property)
        );
        if let Some(locality) = property.locality() {
            println!("      {}", style(locality).dim());
        }
        if let Some(description) = &property.description {
            println!("      {}", style(format!("\"{}\"", clip(description, 140))).italic());
        }
        if property.point().is_err() {
            println!("      {}", style("not on the map").dim().italic());
        }
        if let Some(url) = &property.property_url {
            println!("      {}", style(url).underlined().dim());
        }
    }
    println!();
    println!(
        "  {} listing{}",
        style(properties.len()).bold(),
        if properties.len() == 1 { "" } else { "s" }
    );
    println!();
}

/// All capsules of the session, active one marked.
pub fn capsule_table(capsules: &[SearchCapsule], active: Option<usize>) -> Table {
    let mut table = Table::new();
    table.load_preset(presets::UTF8_FULL_CONDENSED);
    table.set_content_arrangement(ContentArrangement::Dynamic);

    table.set_header(vec![
        Cell::new("#").fg(Color::White),
        Cell::new("Search").fg(Color::White),
        Cell::new("Listings").fg(Color::White),
        Cell::new("Hubs").fg(Color::White),
        Cell::new("Boundary").fg(Color::White),
        Cell::new("At").fg(Color::White),
    ]);

    for (i, capsule) in capsules.iter().enumerate() {
        let number = if active == Some(i) {
            Cell::new(format!("▶ {}", i + 1)).fg(Color::Green)
        } else {
            Cell::new(format!("  {}", i + 1))
        };
        let boundary = select_shape(capsule).map_or("none", |s| s.kind());

        table.add_row(vec![
            number,
            Cell::new(capsule.label()).fg(Color::Cyan),
            Cell::new(capsule.properties().len()),
            Cell::new(capsule.hubs().len()),
            Cell::new(boundary),
            Cell::new(capsule.created_at().format("%H:%M:%S").to_string()).fg(Color::DarkGrey),
        ]);
    }

    table
}

pub fn print_render(report: &RenderReport) {
    match &report.viewport {
        FitOutcome::Applied(viewport) => {
            let b = viewport.bounds;
            println!(
                "  {} camera on {:.4},{:.4} → {:.4},{:.4}",
                style("Map:").bold(),
                b.south,
                b.west,
                b.north,
                b.east
            );
        }
        FitOutcome::NoOp => {
            println!(
                "  {} {}",
                style("Map:").bold(),
                style("nothing to locate, camera unchanged").dim()
            );
        }
    }

    print_boundary(report.overlay.as_ref());

    for error in &report.errors {
        println!("  {} map error: {error}", style("!").yellow().bold());
    }
    println!();
}

pub fn print_boundary(overlay: Option<&(OverlayHandle, OverlayShape)>) {
    match overlay {
        Some((handle, OverlayShape::Polygon { vertices })) => println!(
            "  {} polygon through {} hubs ({handle})",
            style("Boundary:").bold(),
            vertices.len()
        ),
        Some((handle, OverlayShape::Rectangle { .. })) => println!(
            "  {} search zone rectangle ({handle})",
            style("Boundary:").bold()
        ),
        None => println!("  {} {}", style("Boundary:").bold(), style("none").dim()),
    }
}

/// Machine-readable form of a render report.
pub fn render_json(report: &RenderReport) -> Value {
    json!({
        "viewport": report.viewport.viewport(),
        "overlay": report.overlay.as_ref().map(|(handle, shape)| json!({
            "handle": handle,
            "shape": shape,
        })),
        "errors": report.errors.iter().map(ToString::to_string).collect::<Vec<_>>(),
    })
}
