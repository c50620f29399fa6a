use anyhow::Result;
use plot_timeline::{
    drop_target::drop_note, BoundaryResolver, CanvasConfig, DropPayload, EdgeType, EventSearch,
    Resolution, SettingsChange, Size, Timeline, TimelineSettings, ViewportSync,
};

fn main() -> Result<()> {
    println!("Plot Timeline - Canvas Engine Walkthrough");
    println!("=========================================\n");

    let config = CanvasConfig::default();
    let mut timeline = Timeline::from_config(TimelineSettings::default(), &config)?;
    let mut sync = ViewportSync::from_config(Size::new(1024.0, 648.0), &config);

    println!(
        "✓ Created timeline: {} columns x {}px (boundary {})",
        timeline.settings().column_count(),
        timeline.settings().column_width(),
        timeline.boundary()
    );

    // Place a few events
    let arrival = timeline.create_event("Arrival in town", 100.0, 120.0)?;
    let letter = timeline.create_event("The anonymous letter", 650.0, 300.0)?;
    let confrontation = timeline.create_event("Confrontation", 1800.0, 220.0)?;
    println!("\n✓ Placed {} events", timeline.event_count());

    // Drop a note from the notes panel onto column 4
    let note = DropPayload::new("note-42", "Storm rolls in", "scene")
        .with_summary("Power goes out across the valley");
    let viewport = *sync.viewport();
    let storm = drop_note(
        &mut timeline,
        &viewport,
        viewport.world_to_screen(plot_timeline::Point::new(850.0, 500.0)),
        &note,
    )?;
    println!("✓ Dropped note '{}' as event {}", note.title, storm);

    // Link them
    timeline.add_edge(EdgeType::Sequence, arrival, letter)?;
    timeline.add_edge(EdgeType::Causality, letter, confrontation)?;
    timeline.add_edge(EdgeType::Foreshadowing, storm, confrontation)?;
    println!("\n✓ Created {} edges", timeline.edge_count());

    // Search and navigate
    let mut search = EventSearch::new();
    search.set_query("letter", &timeline)?;
    if let Some(found) = search.next(&timeline, &mut sync, &config) {
        let pan = sync.pan();
        println!(
            "\n🔍 '{}' matched {} event(s); centered on {} (pan {:.0}, {:.0})",
            search.query(),
            search.matches().len(),
            found,
            pan.x,
            pan.y
        );
    }
    sync.tick();

    // Shrink to 8 columns: the confrontation at x=1800 is stranded
    let resolver = BoundaryResolver::new(config.out_of_bounds_margin);
    let proposed = timeline.settings().resized(8, 200.0)?;
    match timeline.request_settings_change(proposed, &resolver)? {
        SettingsChange::Committed => println!("\n✓ Settings applied without conflicts"),
        SettingsChange::NeedsResolution(conflict) => {
            println!(
                "\n⚠ Shrinking to boundary {} strands {} event(s) past x = {}",
                conflict.new_boundary,
                conflict.out_of_bounds.len(),
                conflict.limit_x
            );
            for resolution in Resolution::ALL {
                println!("  - {}", resolution);
            }

            let report = timeline.apply_resolution(&conflict, Resolution::Relocate)?;
            println!(
                "\n✓ Resolved with '{}': {} event(s) moved",
                report.resolution,
                report.affected_events.len()
            );
            if let Some(event) = timeline.get_event(confrontation) {
                println!("  '{}' now at x = {}", event.title, event.x);
            }
        }
    }

    // Display timeline structure
    println!("\n📊 Timeline Structure:");
    println!("  └─ Columns: {}", timeline.settings().column_count());
    println!("  └─ Events: {}", timeline.event_count());
    println!("  └─ Edges: {}", timeline.edge_count());
    println!("  └─ Changes logged: {}", timeline.history().len());

    println!("\n✅ Walkthrough complete.\n");
    Ok(())
}
