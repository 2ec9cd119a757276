//! Plain-terminal bar view of a [`Snapshot`].

use sortscope_core::{HighlightRole, Snapshot};

const BAR: char = '█';
const RESET: &str = "\x1b[0m";

/// ANSI clear-screen and cursor-home sequence.
pub const CLEAR: &str = "\x1b[2J\x1b[H";

fn color(role: HighlightRole) -> &'static str {
    match role {
        HighlightRole::Current => "\x1b[31m",
        HighlightRole::CompareA => "\x1b[32m",
        HighlightRole::CompareB => "\x1b[36m",
    }
}

/// Draw `snap` as vertical bars, `height` rows tall and at most `width`
/// columns wide, followed by a counters line.
///
/// Arrays wider than `width` are bucketed; each column shows the tallest
/// value in its bucket and takes the colour of the first role (in
/// [`HighlightRole::ALL`] order) that points into it.
pub fn render_frame(snap: &Snapshot, width: usize, height: usize) -> String {
    let n = snap.values.len();
    let columns = n.min(width.max(1));
    let height = height.max(1);
    let top = snap.values.iter().copied().max().unwrap_or(0) as usize + 1;

    let mut heights = Vec::with_capacity(columns);
    let mut roles = Vec::with_capacity(columns);
    for c in 0..columns {
        let start = c * n / columns;
        let end = ((c + 1) * n / columns).max(start + 1);
        let tallest = snap.values[start..end].iter().copied().max().unwrap_or(0) as usize;
        heights.push(((tallest + 1) * height).div_ceil(top));
        roles.push(
            HighlightRole::ALL
                .into_iter()
                .find(|&role| snap.highlight(role).is_some_and(|i| (start..end).contains(&i))),
        );
    }

    let mut out = String::with_capacity((columns + 8) * (height + 1));
    for row in (1..=height).rev() {
        for (bar, role) in heights.iter().zip(&roles) {
            if *bar < row {
                out.push(' ');
                continue;
            }
            match role {
                Some(role) => {
                    out.push_str(color(*role));
                    out.push(BAR);
                    out.push_str(RESET);
                }
                None => out.push(BAR),
            }
        }
        out.push('\n');
    }

    let c = snap.counters;
    out.push_str(&format!(
        "comparisons {}  accesses {}  swaps {}\n",
        c.comparisons, c.accesses, c.swaps
    ));
    out
}
