//! Header, toolbar and two sidebars built from nested rows and columns.
//!
//! ```bash
//! cargo run --example nested
//! ```

use std::sync::Arc;

use cursor_layout::{FILL, LayoutContext, Logger, MemorySink, Plan, Rect, SizeToken};
use serde_json::json;

fn draw(label: &str, rect: Rect) {
    println!("{}", json!({ "widget": label, "rect": rect }));
}

fn main() -> cursor_layout::Result<()> {
    let sink = Arc::new(MemorySink::new());
    let logger = Logger::from_arc(sink.clone());
    let mut ctx = LayoutContext::new().with_logger(logger);
    ctx.config_mut().set_default_gap(5.0);
    ctx.config_mut().set_default_padding_all(0.0);

    let screen = Rect::new(0.0, 0.0, 1024.0, 512.0);
    let page_plan = Plan::from_raw(&[50.0, -1.0])?.with_padding_all(10.0);
    let header_plan = Plan::from_raw(&[1.0, 4.0])?;
    let content_plan = Plan::from_raw(&[1.0, 3.0, 1.0])?;
    let sidebar_plan = Plan::from_raw(&[-1.0, 100.0, 50.0])?.with_padding_all(10.0);
    let footer_plan = Plan::from_raw(&[-1.0, 50.0])?;

    let mut toolbar_plan = Plan::new();
    toolbar_plan.push(SizeToken::Fill)?;
    toolbar_plan.push_repeat(SizeToken::Fixed(40.0), 10)?;
    toolbar_plan.set_padding_all(10.0);

    {
        let mut page = ctx.column(screen, Some(&page_plan))?;

        let header = page.rect(FILL, FILL);
        {
            let mut row = page.row(header, Some(&header_plan))?;
            draw("Logo", row.rect(FILL, FILL));
            draw("Header", row.rect(FILL, FILL));
        }

        let content = page.rect(FILL, FILL);
        let mut content_row = page.row(content, Some(&content_plan))?;
        draw("Left Sidebar", content_row.rect(FILL, FILL));

        let center = content_row.rect(FILL, FILL);
        {
            let mut column = content_row.column(center, None)?;
            let toolbar = column.rect(60.0, FILL);
            {
                let mut row = column.row(toolbar, None)?;
                draw("Toolbar", row.rect(FILL, FILL));
            }
            {
                let mut row = column.row(toolbar, Some(&toolbar_plan))?;
                draw("Toolbar", row.rect(FILL, FILL));
                for i in 0..10 {
                    draw(&i.to_string(), row.rect(FILL, FILL));
                }
            }

            let main = column.rect(FILL, FILL);
            let mut row = column.row(main, None)?;
            let cell = row.rect(FILL, FILL);
            let mut inner = row.column(cell, Some(&footer_plan))?;
            draw("Content", inner.rect(FILL, FILL));
            draw("Footer", inner.rect(FILL, FILL));
        }

        let sidebar = content_row.rect(FILL, FILL);
        let mut column = content_row.column(sidebar, Some(&sidebar_plan))?;
        draw("Right Sidebar", column.last_rect());
        draw("Sidebar Nested", column.rect(FILL, FILL));
        draw("Custom Size", column.rect(100.0, 100.0));
        draw("Right Nested Footer", column.rect(FILL, FILL));
    }

    ctx.emit_metrics();
    for event in sink.events() {
        eprintln!("{}", serde_json::to_string(&event)?);
    }
    Ok(())
}
