//! Render one ribbon to SVG on stdout.
//!
//! Usage: `cargo run --example simple --features tracing -- [orientation] [label]`

use ribbontag::{Orientation, Size, Style};

fn main() -> miette::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("ribbontag=debug")),
        )
        .with_writer(std::io::stderr)
        .init();

    let mut args = std::env::args().skip(1);
    let orientation = match args.next() {
        Some(name) => name.parse::<Orientation>().map_err(|e| miette::miette!("{}", e))?,
        None => Orientation::TopLeftCorner,
    };
    let label = args.next().unwrap_or_else(|| "NEW".to_string());

    let style = Style::default().with_autoresizes(true);
    let svg = ribbontag::render_svg(&label, orientation, style, Size::new(240.0, 160.0))?;
    println!("{}", svg);
    Ok(())
}
