use camino::Utf8PathBuf;
use rayon::prelude::*;
use ribbontag::{Color, Orientation, Ribbon, Size, Style, SvgRenderer};
use std::fs;

fn main() {
    let args: Vec<String> = std::env::args().collect();
    if args.len() < 2 {
        eprintln!("Usage: cargo xtask <command>");
        eprintln!("Commands:");
        eprintln!("  gallery [out.html]    Render every orientation and style variant to HTML");
        std::process::exit(1);
    }

    match args[1].as_str() {
        "gallery" => gallery(args.get(2).map(Utf8PathBuf::from)),
        _ => {
            eprintln!("Unknown command: {}", args[1]);
            std::process::exit(1);
        }
    }
}

/// A named tweak applied on top of the default style
struct Variant {
    name: &'static str,
    label: &'static str,
    container: Size,
    style: fn() -> Style,
    /// Hex ribbon color overriding the style's.
    ribbon_color: Option<&'static str>,
}

const VARIANTS: &[Variant] = &[
    Variant {
        name: "default",
        label: "NEW",
        container: Size {
            width: 240.0,
            height: 160.0,
        },
        style: Style::default,
        ribbon_color: None,
    },
    Variant {
        name: "autoresize",
        label: "LIMITED\nEDITION",
        container: Size {
            width: 240.0,
            height: 160.0,
        },
        style: || Style::default().with_autoresizes(true),
        ribbon_color: Some("#2a6f97"),
    },
    Variant {
        name: "flat",
        label: "SALE",
        container: Size {
            width: 240.0,
            height: 160.0,
        },
        style: || Style::default().with_shadow(false).with_decorators(false),
        ribbon_color: Some("#3a7d44"),
    },
    Variant {
        name: "tight",
        label: "HOT",
        container: Size {
            width: 60.0,
            height: 40.0,
        },
        style: || Style::default().with_ribbon_width(30.0),
        ribbon_color: None,
    },
];

struct Entry {
    orientation: Orientation,
    variant: &'static str,
    svg: Result<String, String>,
    diagnostics: Vec<String>,
}

fn render(orientation: Orientation, variant: &Variant) -> Entry {
    let renderer = SvgRenderer::new(variant.label)
        .with_font_size(14.0)
        .with_background(Color::rgb(0.93, 0.93, 0.93));
    let result = style_for(variant).and_then(|style| {
        let mut ribbon =
            Ribbon::with_style(renderer, orientation, style).map_err(|e| e.to_string())?;
        ribbon.attach(variant.container).map_err(|e| e.to_string())?;
        Ok(ribbon.into_renderer())
    });
    let (svg, diagnostics) = match result {
        Ok(r) => (Ok(r.finish()), r.diagnostics().to_vec()),
        Err(e) => (Err(e), Vec::new()),
    };
    Entry {
        orientation,
        variant: variant.name,
        svg,
        diagnostics,
    }
}

fn style_for(variant: &Variant) -> Result<Style, String> {
    let style = (variant.style)();
    match variant.ribbon_color {
        Some(hex) => {
            let color: Color = hex.parse().map_err(|e| format!("{}: {}", hex, e))?;
            Ok(Style {
                ribbon_color: color,
                ..style
            })
        }
        None => Ok(style),
    }
}

fn gallery(out: Option<Utf8PathBuf>) {
    let manifest_dir = Utf8PathBuf::from(env!("CARGO_MANIFEST_DIR"));
    let output_path = out.unwrap_or_else(|| manifest_dir.join("../gallery.html"));

    let jobs: Vec<_> = Orientation::ALL
        .iter()
        .flat_map(|o| VARIANTS.iter().map(move |v| (*o, v)))
        .collect();

    let entries: Vec<Entry> = jobs
        .par_iter()
        .map(|(o, v)| {
            eprintln!("Rendering {} / {}...", o, v.name);
            render(*o, v)
        })
        .collect();

    let failed = entries.iter().filter(|e| e.svg.is_err()).count();

    let mut html = String::new();
    html.push_str(&format!(
        r#"<!DOCTYPE html>
<html>
<head>
    <meta charset="UTF-8">
    <title>Ribbon gallery</title>
    <style>
        * {{
            box-sizing: border-box;
        }}
        body {{
            font-family: system-ui, sans-serif;
            margin: 0;
            padding: 24px;
            background: #eee;
            color: #333;
        }}
        h1 {{
            font-weight: 600;
            font-size: 20px;
            margin: 0 0 24px 0;
        }}
        .grid {{
            display: grid;
            grid-template-columns: repeat({cols}, auto);
            gap: 16px;
            align-items: start;
        }}
        .card {{
            background: white;
            border-radius: 8px;
            box-shadow: 0 1px 3px rgba(0,0,0,0.08);
            padding: 12px;
        }}
        .card-title {{
            font-size: 12px;
            font-weight: 600;
            margin-bottom: 8px;
        }}
        .note {{
            font-size: 11px;
            color: #a33;
            margin-top: 6px;
        }}
    </style>
</head>
<body>
<h1>{total} ribbons, {failed} failed</h1>
<div class="grid">
"#,
        cols = VARIANTS.len(),
        total = entries.len(),
        failed = failed,
    ));

    for entry in &entries {
        html.push_str("<div class=\"card\">\n");
        html.push_str(&format!(
            "<div class=\"card-title\">{} / {}</div>\n",
            entry.orientation, entry.variant
        ));
        match &entry.svg {
            Ok(svg) => html.push_str(svg),
            Err(e) => html.push_str(&format!("<div class=\"note\">Error: {}</div>\n", html_escape(e))),
        }
        for note in &entry.diagnostics {
            html.push_str(&format!("<div class=\"note\">{}</div>\n", html_escape(note)));
        }
        html.push_str("</div>\n");
    }

    html.push_str("</div>\n</body>\n</html>\n");

    if let Err(e) = fs::write(&output_path, html) {
        eprintln!("Failed to write {}: {}", output_path, e);
        std::process::exit(1);
    }
    eprintln!("Wrote {}", output_path);
}

fn html_escape(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
}
