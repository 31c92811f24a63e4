//! Dashboard Example - one frame sized to the real terminal
//!
//! This example plays the host application:
//! - Queries the terminal size
//! - Lays out header, content and footer with a theme
//! - Sizes the content band from an image placeholder
//! - Prints a single frame
//!
//! Run with: cargo run --example dashboard [terminal|dracula|nord]
//! Logs go to stderr: RUST_LOG=gridframe=trace cargo run --example dashboard

use std::io::{self, Write};
use std::rc::Rc;

use gridframe::config::LayoutConfig;
use gridframe::layout::{CONTENT, FOOTER, HEADER, LayoutManager};
use gridframe::primitives::{ImagePlaceholder, Text, TextWrap};
use gridframe::theme::{Role, Theme};
use gridframe::{BorderStyle, Size, TextAlign};
use tracing_subscriber::EnvFilter;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(io::stderr)
        .init();

    let preset = std::env::args().nth(1).unwrap_or_else(|| "terminal".to_string());
    let theme = Theme::from_preset(&preset)?;

    // Not a tty (piped output, CI): fall back to the classic size.
    let (cols, rows) = crossterm::terminal::size().unwrap_or((80, 24));

    let config = LayoutConfig::default().header_height(2).footer_height(1);
    let mut layout = LayoutManager::with_size(config, i32::from(cols), i32::from(rows));

    let image = ImagePlaceholder::new(
        "chart.png (40x12)",
        Size::new(cols.min(40), 12),
    )
    .border(BorderStyle::Rounded)
    .style(theme.style(Role::Border));
    let hint = image.content_height_hint();

    layout.add_component(
        HEADER,
        Rc::new(
            Text::new(format!("gridframe dashboard\ntheme: {}", theme.name))
                .style(theme.style(Role::Header))
                .align(TextAlign::Center),
        ),
    );
    layout.add_component(CONTENT, Rc::new(image));
    layout.add_component(
        FOOTER,
        Rc::new(
            Text::new(format!("{cols}x{rows}  ·  one frame, no event loop"))
                .style(theme.style(Role::Footer))
                .wrap(TextWrap::Truncate),
        ),
    );

    layout.image_layout(hint);

    let frame = layout.render();
    let mut stdout = io::stdout().lock();
    writeln!(stdout, "{frame}")?;
    stdout.flush()?;
    Ok(())
}
