/// Example: Outlining a three-act story
///
/// This example demonstrates:
/// - Creating a timeline with act columns
/// - Dragging events and linking them through the interaction controller
/// - Reading the minimap transform
/// - Shrinking the column count and compressing stranded events

use anyhow::Result;
use plot_timeline::render::MinimapLayout;
use plot_timeline::*;

fn main() -> Result<()> {
    println!("=== Plot Timeline: Story Outline Example ===\n");

    let config = CanvasConfig::default();

    // Step 1: Timeline with act columns
    println!("Step 1: Creating timeline...");
    let settings = TimelineSettings::new(6, 300.0, ColumnTemplate::Act)?;
    let mut timeline = Timeline::from_config(settings, &config)?;
    for column in timeline.settings().columns() {
        println!("  • {} {}", column.name, column.subtitle);
    }

    // Step 2: Events
    println!("\nStep 2: Placing events...");
    let hook = timeline.create_event("Hook", 40.0, 80.0)?;
    let turn = timeline.create_event("First turn", 700.0, 260.0)?;
    let finale = timeline.create_event("Finale", 1650.0, 140.0)?;
    println!("  ✓ {} events", timeline.event_count());

    // Step 3: Drive the canvas the way pointer input would
    println!("\nStep 3: Linking through the canvas...");
    let canvas = Size::new(1200.0, 748.0);
    let mut sync = ViewportSync::from_config(canvas, &config);
    let layout = SurfaceLayout::for_canvas(canvas, &config);
    let mut controller = InteractionController::new();
    controller.set_connection_mode(ConnectionMode::Causality);

    for id in [hook, turn] {
        let Some(event) = timeline.get_event(id) else {
            continue;
        };
        let screen = sync
            .viewport()
            .world_to_screen(event.bounds(config.event_size()).center());
        let mut ctx = InteractionContext {
            timeline: &mut timeline,
            sync: &mut sync,
            config: &config,
            layout: &layout,
        };
        controller.pointer_down(&mut ctx, screen);
        let outcome = controller.pointer_up(&mut ctx, screen);
        println!("  → {:?}", outcome);
    }
    timeline.add_edge(EdgeType::Foreshadowing, hook, finale)?;
    println!("  ✓ {} edges", timeline.edge_count());

    // Step 4: Minimap transform
    println!("\nStep 4: Minimap...");
    let minimap = MinimapLayout::new(layout.minimap, timeline.content_size());
    let rect = minimap.viewport_rect(sync.viewport());
    println!(
        "  scale ({:.3}, {:.3}), viewport box {:.0}x{:.0} at ({:.0}, {:.0})",
        minimap.scale_x, minimap.scale_y, rect.width, rect.height, rect.x, rect.y
    );

    // Step 5: Shrink to four acts and compress
    println!("\nStep 5: Shrinking to 4 columns...");
    let resolver = BoundaryResolver::new(config.out_of_bounds_margin);
    let proposed = timeline.settings().resized(4, 300.0)?;
    if let SettingsChange::NeedsResolution(conflict) =
        timeline.request_settings_change(proposed, &resolver)?
    {
        println!(
            "  ⚠ {} event(s) past x = {}",
            conflict.out_of_bounds.len(),
            conflict.limit_x
        );
        let report = timeline.apply_resolution(&conflict, Resolution::Compress)?;
        println!("  ✓ Compressed {} event(s)", report.affected_events.len());
    }

    for event in timeline.events_in_reading_order() {
        println!("  • {:<12} x = {:>7.1}", event.title, event.x);
    }

    println!("\n=== Example Complete ===");
    Ok(())
}
