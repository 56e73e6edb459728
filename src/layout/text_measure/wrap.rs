//! Word wrapping for terminal text.
//!
//! Lines break at spaces. A word wider than the line is broken at grapheme
//! boundaries. Explicit newlines are hard breaks. Escape sequences are kept
//! in place and never count towards a line's width, including the ones that
//! sit inside whitespace dropped at a break.

use unicode_segmentation::UnicodeSegmentation;

use super::ansi::{AnsiSegment, ansi_segments};
use super::width::grapheme_width;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum AtomKind {
    Escape,
    Space,
    Glyph,
}

#[derive(Debug, Clone, Copy)]
struct Atom<'a> {
    text: &'a str,
    width: usize,
    kind: AtomKind,
}

/// A run of atoms of the same kind; escapes join whichever run is open.
#[derive(Debug, Default)]
struct Run<'a> {
    atoms: Vec<Atom<'a>>,
    width: usize,
    is_space: Option<bool>,
}

fn atoms(line: &str) -> Vec<Atom<'_>> {
    let mut atoms = Vec::new();
    for segment in ansi_segments(line) {
        match segment {
            AnsiSegment::Escape(text) => atoms.push(Atom {
                text,
                width: 0,
                kind: AtomKind::Escape,
            }),
            AnsiSegment::Text(text) => {
                atoms.extend(text.graphemes(true).map(|grapheme| Atom {
                    text: grapheme,
                    width: grapheme_width(grapheme),
                    kind: if grapheme.chars().all(char::is_whitespace) {
                        AtomKind::Space
                    } else {
                        AtomKind::Glyph
                    },
                }));
            }
        }
    }
    atoms
}

fn runs(atoms: Vec<Atom<'_>>) -> Vec<Run<'_>> {
    let mut runs = Vec::new();
    let mut current = Run::default();

    for atom in atoms {
        if atom.kind != AtomKind::Escape {
            let is_space = atom.kind == AtomKind::Space;
            if current.is_space.is_some_and(|kind| kind != is_space) {
                runs.push(std::mem::take(&mut current));
            }
            current.is_space = Some(is_space);
        }
        current.width += atom.width;
        current.atoms.push(atom);
    }

    if !current.atoms.is_empty() {
        runs.push(current);
    }
    runs
}

/// Render the pending atoms of a line, dropping trailing spaces when the
/// line ends at a soft break. Escapes are always kept.
fn finish_line(current: &mut Vec<Atom<'_>>, trim_end: bool) -> String {
    let last_glyph = current.iter().rposition(|atom| atom.kind == AtomKind::Glyph);
    let line = current
        .iter()
        .enumerate()
        .filter(|(index, atom)| {
            !(trim_end
                && atom.kind == AtomKind::Space
                && last_glyph.is_none_or(|last| *index > last))
        })
        .map(|(_, atom)| atom.text)
        .collect();
    current.clear();
    line
}

/// Wrap text to `max_width` columns, breaking at spaces.
///
/// Returns one entry per output line. Empty input yields no lines;
/// `max_width == 0` leaves each input line untouched.
pub fn wrap_lines(text: &str, max_width: usize) -> Vec<String> {
    if text.is_empty() {
        return Vec::new();
    }
    if max_width == 0 {
        return text.split('\n').map(str::to_string).collect();
    }

    let mut lines = Vec::new();
    for raw_line in text.split('\n') {
        wrap_line(raw_line, max_width, &mut lines);
    }
    lines
}

/// [`wrap_lines`] joined back with `\n`.
pub fn wrap_text(text: &str, max_width: usize) -> String {
    wrap_lines(text, max_width).join("\n")
}

fn wrap_line(line: &str, max_width: usize, lines: &mut Vec<String>) {
    let mut current: Vec<Atom<'_>> = Vec::new();
    let mut current_width = 0usize;

    for run in runs(atoms(line)) {
        if current_width + run.width > max_width {
            if current_width > 0 {
                lines.push(finish_line(&mut current, true));
                current_width = 0;
            }

            if run.width > max_width {
                force_break(run.atoms, max_width, lines, &mut current, &mut current_width);
                continue;
            }

            // Whitespace at the start of a wrapped line is dropped.
            if run.is_space == Some(true) {
                current.extend(run.atoms.into_iter().filter(|atom| atom.kind == AtomKind::Escape));
                continue;
            }
        }

        current_width += run.width;
        current.extend(run.atoms);
    }

    lines.push(finish_line(&mut current, false));
}

/// Break a run wider than the line at grapheme boundaries.
fn force_break<'a>(
    run: Vec<Atom<'a>>,
    max_width: usize,
    lines: &mut Vec<String>,
    current: &mut Vec<Atom<'a>>,
    current_width: &mut usize,
) {
    for atom in run {
        if *current_width + atom.width > max_width && *current_width > 0 {
            lines.push(finish_line(current, false));
            *current_width = 0;
        }
        *current_width += atom.width;
        current.push(atom);
    }
}
