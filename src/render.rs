//! Renderer boundary: what the playback loop hands out per tick, and a terminal renderer.

use std::io::Write;

use crate::{Highlight, SortResult, StatusLabel};

/// Everything a renderer needs to draw one step.
#[derive(Debug, Clone, Copy)]
pub struct Frame<'a> {
    pub values: &'a [u32],
    pub highlight: &'a Highlight,
    pub comparisons: u64,
    pub writes: u64,
    pub cursor: usize,
    pub total: usize,
    pub status: StatusLabel,
}

pub trait Renderer {
    fn render(&mut self, frame: &Frame<'_>) -> SortResult<()>;
}

#[derive(Debug, Default, Clone, Copy)]
pub struct NullRenderer;

impl Renderer for NullRenderer {
    fn render(&mut self, _frame: &Frame<'_>) -> SortResult<()> {
        Ok(())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Role {
    Plain,
    Sorted,
    Pivot,
    Compare,
    Swap,
}

impl Role {
    fn of(index: usize, highlight: &Highlight) -> Self {
        let hit = |pair: Option<(usize, usize)>| pair.is_some_and(|(a, b)| a == index || b == index);
        if hit(highlight.swap) || highlight.write == Some(index) {
            Self::Swap
        } else if hit(highlight.compare) {
            Self::Compare
        } else if highlight.pivot == Some(index) {
            Self::Pivot
        } else if highlight.sorted.contains(&index) {
            Self::Sorted
        } else {
            Self::Plain
        }
    }

    fn ansi(self) -> &'static str {
        match self {
            Self::Plain => "37",
            Self::Sorted => "32",
            Self::Pivot => "35;1",
            Self::Compare => "33;1",
            Self::Swap => "31;1",
        }
    }

    /// Glyph used when colors are off.
    fn glyph(self) -> char {
        match self {
            Self::Plain => '|',
            Self::Sorted => '#',
            Self::Pivot => 'P',
            Self::Compare => '?',
            Self::Swap => '*',
        }
    }
}

/// Draws one column per value, scaled to the largest value.
pub struct TerminalRenderer<W: Write> {
    out: W,
    height: usize,
    no_color: bool,
}

impl<W: Write> TerminalRenderer<W> {
    pub fn new(out: W, height: usize, no_color: bool) -> Self {
        Self {
            out,
            height: height.max(1),
            no_color,
        }
    }

    pub fn into_inner(self) -> W {
        self.out
    }

    fn cell(&self, role: Role, filled: bool) -> String {
        if !filled {
            return " ".to_string();
        }
        if self.no_color {
            return role.glyph().to_string();
        }
        format!("\x1b[{}m\u{2588}\x1b[0m", role.ansi())
    }

    fn draw(&self, frame: &Frame<'_>) -> String {
        let max = frame.values.iter().copied().max().unwrap_or(1).max(1);
        let heights: Vec<usize> = frame
            .values
            .iter()
            .map(|v| ((u64::from(*v) * self.height as u64).div_ceil(u64::from(max))) as usize)
            .collect();
        let roles: Vec<Role> = (0..frame.values.len())
            .map(|i| Role::of(i, frame.highlight))
            .collect();

        let mut out = String::new();
        if !self.no_color {
            out.push_str("\x1b[H\x1b[2J");
        }
        for row in (1..=self.height).rev() {
            for (h, role) in heights.iter().zip(&roles) {
                out.push_str(&self.cell(*role, *h >= row));
            }
            out.push('\n');
        }
        out.push_str(&format!(
            "{:<9} {}/{}  comparisons={}  writes={}\n",
            frame.status.as_str(),
            frame.cursor,
            frame.total,
            frame.comparisons,
            frame.writes
        ));
        out
    }
}

impl<W: Write> Renderer for TerminalRenderer<W> {
    fn render(&mut self, frame: &Frame<'_>) -> SortResult<()> {
        let text = self.draw(frame);
        self.out.write_all(text.as_bytes())?;
        self.out.flush()?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::BTreeSet;

    #[test]
    fn plain_rendering_marks_roles() {
        let highlight = Highlight {
            compare: Some((0, 1)),
            pivot: Some(2),
            sorted: BTreeSet::from([3]),
            ..Highlight::default()
        };
        let values = [2, 4, 4, 4];
        let frame = Frame {
            values: &values,
            highlight: &highlight,
            comparisons: 1,
            writes: 0,
            cursor: 2,
            total: 9,
            status: StatusLabel::Stepping,
        };
        let mut renderer = TerminalRenderer::new(Vec::new(), 2, true);
        renderer.render(&frame).expect("render");
        let text = String::from_utf8(renderer.into_inner()).expect("utf8");
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines[0], " ?P#");
        assert_eq!(lines[1], "??P#");
        assert!(lines[2].starts_with("Stepping"));
        assert!(lines[2].contains("2/9"));
        assert!(lines[2].contains("comparisons=1"));
    }

    #[test]
    fn write_highlight_wins_over_sorted() {
        let highlight = Highlight {
            write: Some(0),
            sorted: BTreeSet::from([0]),
            ..Highlight::default()
        };
        assert_eq!(Role::of(0, &highlight), Role::Swap);
        assert_eq!(Role::of(1, &highlight), Role::Plain);
    }
}
