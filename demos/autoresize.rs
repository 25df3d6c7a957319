//! Walk a ribbon through a few layout events and print what each pass drew.

use ribbontag::render::{DrawCommand, LayerSlot};
use ribbontag::{Orientation, RecordingRenderer, Ribbon, Size, Style};

fn report(step: &str, ribbon: &Ribbon<RecordingRenderer>) {
    let r = ribbon.renderer();
    let outline = r
        .last_polygon(LayerSlot::Ribbon)
        .map(|p| p.to_path_data())
        .unwrap_or_default();
    let passes = r
        .commands()
        .iter()
        .filter(|c| matches!(c, DrawCommand::Mask(_)))
        .count();
    println!(
        "{step}: width={} padding={} passes={passes} measured={}\n  {outline}",
        ribbon.style().ribbon_width,
        ribbon.style().autoresize_padding,
        r.measure_calls(),
    );
}

fn main() -> miette::Result<()> {
    let style = Style::default()
        .with_autoresizes(true)
        .with_autoresize_padding(8.0);
    let renderer = RecordingRenderer::new(Size::new(48.0, 16.0));
    let mut ribbon = Ribbon::with_style(renderer, Orientation::TopRightCorner, style)?;

    ribbon.attach(Size::new(240.0, 160.0))?;
    report("attach", &ribbon);

    ribbon.renderer_mut().clear_commands();
    ribbon.renderer_mut().set_label_size(Size::new(48.0, 32.0));
    ribbon.label_layout_changed(Size::new(48.0, 32.0));
    report("two-line label", &ribbon);

    ribbon.renderer_mut().clear_commands();
    ribbon.container_resized(Size::new(30.0, 30.0))?;
    report("shrunk container", &ribbon);

    ribbon.renderer_mut().clear_commands();
    ribbon.set_orientation(Orientation::Top);
    report("top edge", &ribbon);

    Ok(())
}
