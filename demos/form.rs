//! Login form layout, printed as JSON lines instead of drawn.
//!
//! ```bash
//! cargo run --example form
//! ```

use cursor_layout::{FILL, LayoutContext, Plan, Rect};
use serde_json::json;

fn draw(label: &str, rect: Rect) {
    println!("{}", json!({ "widget": label, "rect": rect }));
}

fn main() -> cursor_layout::Result<()> {
    let mut ctx = LayoutContext::new();
    ctx.config_mut().set_default_gap(10.0);

    let screen = Rect::new(0.0, 0.0, 300.0, 200.0);
    let login_plan = Plan::from_raw(&[-1.0, 100.0, -1.0])?;

    ctx.config_mut().set_default_padding_all(10.0);
    let mut form = ctx.column(screen, None)?;
    form.config_mut().set_default_padding_all(0.0);

    for field in ["Username:", "Password:"] {
        let line = form.rect(50.0, FILL);
        let mut row = form.row(line, None)?;
        draw(field, row.rect(75.0, FILL));
        draw("text_box", row.rect(FILL, FILL));
    }

    let line = form.rect(50.0, FILL);
    let mut row = form.row(line, Some(&login_plan))?;
    row.rect(FILL, FILL);
    draw("Login", row.rect(FILL, FILL));
    row.rect(FILL, FILL);

    Ok(())
}
