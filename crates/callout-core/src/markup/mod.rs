//! Callout markup inserted into the document.
//!
//! A callout is a block quote whose first line carries the type label:
//!
//! ```text
//! > [!tip]
//! > Body text, one quoted line per source line.
//! ```
//!
//! With nothing selected the markup ends in an open `> ` line so the cursor
//! lands inside the callout body.  With a selection, every selected line is
//! quoted and becomes the body.

/// Renders the markup for callout `identifier`, wrapping `selection`.
pub fn render_callout(identifier: &str, selection: &str) -> String {
    let mut out = format!("> [!{identifier}]\n");
    if selection.is_empty() {
        out.push_str("> ");
        return out;
    }
    for line in selection.lines() {
        if line.is_empty() {
            out.push('>');
        } else {
            out.push_str("> ");
            out.push_str(line);
        }
        out.push('\n');
    }
    out
}
