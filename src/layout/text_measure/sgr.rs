//! SGR (Select Graphic Rendition) state tracking.
//!
//! Slicing a styled string must re-open the styles that were active where the
//! slice starts and close the ones still active where it ends. [`SgrState`]
//! folds a stream of escape sequences into the set of styles currently in
//! effect and renders that set back as one opening or one closing sequence.

/// Independent style channels. Each holds at most one active value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Slot {
    Foreground,
    Background,
    UnderlineColor,
    Bold,
    Dim,
    Italic,
    Underline,
    Blink,
    Inverse,
    Hidden,
    Strikethrough,
    Overline,
}

const SLOTS: usize = 12;

/// Parameter that turns each slot off, indexed like [`Slot`].
const CLOSERS: [&str; SLOTS] = [
    "39", "49", "59", "22", "22", "23", "24", "25", "27", "28", "29", "55",
];

/// Styles in effect at some point of a string.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SgrState {
    slots: [Option<String>; SLOTS],
}

impl SgrState {
    /// Fold one escape sequence into the state. Anything other than an SGR
    /// sequence leaves it untouched.
    pub fn apply(&mut self, escape: &str) {
        let Some(params) = sgr_params(escape) else {
            return;
        };

        let params: Vec<&str> = params.split(';').collect();
        let mut i = 0;
        while i < params.len() {
            let param = params[i];
            i += 1;

            match param {
                "" | "0" => self.slots = Default::default(),
                "1" => self.set(Slot::Bold, param),
                "2" => self.set(Slot::Dim, param),
                "3" => self.set(Slot::Italic, param),
                "4" | "21" => self.set(Slot::Underline, param),
                "5" | "6" => self.set(Slot::Blink, param),
                "7" => self.set(Slot::Inverse, param),
                "8" => self.set(Slot::Hidden, param),
                "9" => self.set(Slot::Strikethrough, param),
                "53" => self.set(Slot::Overline, param),
                "22" => {
                    self.clear(Slot::Bold);
                    self.clear(Slot::Dim);
                }
                "23" => self.clear(Slot::Italic),
                "24" => self.clear(Slot::Underline),
                "25" => self.clear(Slot::Blink),
                "27" => self.clear(Slot::Inverse),
                "28" => self.clear(Slot::Hidden),
                "29" => self.clear(Slot::Strikethrough),
                "55" => self.clear(Slot::Overline),
                "39" => self.clear(Slot::Foreground),
                "49" => self.clear(Slot::Background),
                "59" => self.clear(Slot::UnderlineColor),
                "38" | "48" | "58" => {
                    let slot = match param {
                        "38" => Slot::Foreground,
                        "48" => Slot::Background,
                        _ => Slot::UnderlineColor,
                    };
                    let extra = match params.get(i).copied() {
                        Some("5") => 2,
                        Some("2") => 4,
                        _ => 0,
                    };
                    let end = (i + extra).min(params.len());
                    let mut value = param.to_string();
                    for part in &params[i..end] {
                        value.push(';');
                        value.push_str(part);
                    }
                    i = end;
                    self.set(slot, &value);
                }
                _ => match param.split(':').next().and_then(|code| code.parse::<u16>().ok()) {
                    Some(30..=37 | 90..=97) => self.set(Slot::Foreground, param),
                    Some(40..=47 | 100..=107) => self.set(Slot::Background, param),
                    Some(38) => self.set(Slot::Foreground, param),
                    Some(48) => self.set(Slot::Background, param),
                    Some(58) => self.set(Slot::UnderlineColor, param),
                    Some(4) if param == "4:0" => self.clear(Slot::Underline),
                    Some(4) => self.set(Slot::Underline, param),
                    _ => {}
                },
            }
        }
    }

    /// One sequence re-establishing every active style, or `""`.
    pub fn opening(&self) -> String {
        let params: Vec<&str> = self.slots.iter().flatten().map(String::as_str).collect();
        sequence(&params)
    }

    /// One sequence turning every active style off, or `""`.
    pub fn closing(&self) -> String {
        let mut params: Vec<&str> = Vec::new();
        for (slot, closer) in self.slots.iter().zip(CLOSERS) {
            if slot.is_some() && !params.contains(&closer) {
                params.push(closer);
            }
        }
        sequence(&params)
    }

    fn set(&mut self, slot: Slot, value: &str) {
        self.slots[slot as usize] = Some(value.to_string());
    }

    fn clear(&mut self, slot: Slot) {
        self.slots[slot as usize] = None;
    }
}

/// Whether `escape` is an SGR sequence.
pub fn is_sgr(escape: &str) -> bool {
    sgr_params(escape).is_some()
}

/// Parameter text of an SGR sequence (`ESC [ ... m`).
fn sgr_params(escape: &str) -> Option<&str> {
    let params = escape.strip_prefix("\x1b[")?.strip_suffix('m')?;
    params
        .bytes()
        .all(|b| b.is_ascii_digit() || b == b';' || b == b':')
        .then_some(params)
}

fn sequence(params: &[&str]) -> String {
    if params.is_empty() {
        String::new()
    } else {
        format!("\x1b[{}m", params.join(";"))
    }
}
