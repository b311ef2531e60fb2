//! Arabic contextual shaping.
//!
//! Replaces Arabic letters stored in logical order with the presentation
//! form matching their joining position (isolated, final, initial, medial).
//! No reordering happens here.

/// Dual-joining letters: isolated, final, initial, medial.
/// Sorted by base code point.
const DUAL_JOINING: &[(char, [char; 4])] = &[
    ('\u{0626}', ['\u{FE89}', '\u{FE8A}', '\u{FE8B}', '\u{FE8C}']), // yeh with hamza
    ('\u{0628}', ['\u{FE8F}', '\u{FE90}', '\u{FE91}', '\u{FE92}']), // beh
    ('\u{062A}', ['\u{FE95}', '\u{FE96}', '\u{FE97}', '\u{FE98}']), // teh
    ('\u{062B}', ['\u{FE99}', '\u{FE9A}', '\u{FE9B}', '\u{FE9C}']), // theh
    ('\u{062C}', ['\u{FE9D}', '\u{FE9E}', '\u{FE9F}', '\u{FEA0}']), // jeem
    ('\u{062D}', ['\u{FEA1}', '\u{FEA2}', '\u{FEA3}', '\u{FEA4}']), // hah
    ('\u{062E}', ['\u{FEA5}', '\u{FEA6}', '\u{FEA7}', '\u{FEA8}']), // khah
    ('\u{0633}', ['\u{FEB1}', '\u{FEB2}', '\u{FEB3}', '\u{FEB4}']), // seen
    ('\u{0634}', ['\u{FEB5}', '\u{FEB6}', '\u{FEB7}', '\u{FEB8}']), // sheen
    ('\u{0635}', ['\u{FEB9}', '\u{FEBA}', '\u{FEBB}', '\u{FEBC}']), // sad
    ('\u{0636}', ['\u{FEBD}', '\u{FEBE}', '\u{FEBF}', '\u{FEC0}']), // dad
    ('\u{0637}', ['\u{FEC1}', '\u{FEC2}', '\u{FEC3}', '\u{FEC4}']), // tah
    ('\u{0638}', ['\u{FEC5}', '\u{FEC6}', '\u{FEC7}', '\u{FEC8}']), // zah
    ('\u{0639}', ['\u{FEC9}', '\u{FECA}', '\u{FECB}', '\u{FECC}']), // ain
    ('\u{063A}', ['\u{FECD}', '\u{FECE}', '\u{FECF}', '\u{FED0}']), // ghain
    ('\u{0640}', ['\u{0640}', '\u{0640}', '\u{0640}', '\u{0640}']), // tatweel
    ('\u{0641}', ['\u{FED1}', '\u{FED2}', '\u{FED3}', '\u{FED4}']), // feh
    ('\u{0642}', ['\u{FED5}', '\u{FED6}', '\u{FED7}', '\u{FED8}']), // qaf
    ('\u{0643}', ['\u{FED9}', '\u{FEDA}', '\u{FEDB}', '\u{FEDC}']), // kaf
    ('\u{0644}', ['\u{FEDD}', '\u{FEDE}', '\u{FEDF}', '\u{FEE0}']), // lam
    ('\u{0645}', ['\u{FEE1}', '\u{FEE2}', '\u{FEE3}', '\u{FEE4}']), // meem
    ('\u{0646}', ['\u{FEE5}', '\u{FEE6}', '\u{FEE7}', '\u{FEE8}']), // noon
    ('\u{0647}', ['\u{FEE9}', '\u{FEEA}', '\u{FEEB}', '\u{FEEC}']), // heh
    ('\u{064A}', ['\u{FEF1}', '\u{FEF2}', '\u{FEF3}', '\u{FEF4}']), // yeh
    ('\u{067E}', ['\u{FB56}', '\u{FB57}', '\u{FB58}', '\u{FB59}']), // peh
    ('\u{0686}', ['\u{FB7A}', '\u{FB7B}', '\u{FB7C}', '\u{FB7D}']), // tcheh
    ('\u{06A9}', ['\u{FB8E}', '\u{FB8F}', '\u{FB90}', '\u{FB91}']), // keheh
    ('\u{06AF}', ['\u{FB92}', '\u{FB93}', '\u{FB94}', '\u{FB95}']), // gaf
    ('\u{06CC}', ['\u{FBFC}', '\u{FBFD}', '\u{FBFE}', '\u{FBFF}']), // farsi yeh
];

/// Right-joining letters: isolated, final. They never join the next letter.
const RIGHT_JOINING: &[(char, [char; 2])] = &[
    ('\u{0622}', ['\u{FE81}', '\u{FE82}']), // alef with madda
    ('\u{0623}', ['\u{FE83}', '\u{FE84}']), // alef with hamza above
    ('\u{0624}', ['\u{FE85}', '\u{FE86}']), // waw with hamza
    ('\u{0625}', ['\u{FE87}', '\u{FE88}']), // alef with hamza below
    ('\u{0627}', ['\u{FE8D}', '\u{FE8E}']), // alef
    ('\u{0629}', ['\u{FE93}', '\u{FE94}']), // teh marbuta
    ('\u{062F}', ['\u{FEA9}', '\u{FEAA}']), // dal
    ('\u{0630}', ['\u{FEAB}', '\u{FEAC}']), // thal
    ('\u{0631}', ['\u{FEAD}', '\u{FEAE}']), // reh
    ('\u{0632}', ['\u{FEAF}', '\u{FEB0}']), // zain
    ('\u{0648}', ['\u{FEED}', '\u{FEEE}']), // waw
    ('\u{0649}', ['\u{FEEF}', '\u{FEF0}']), // alef maksura
    ('\u{0698}', ['\u{FB8A}', '\u{FB8B}']), // jeh
];

/// Lam followed by an alef variant: alef, isolated ligature, final ligature.
const LAM_ALEF: &[(char, [char; 2])] = &[
    ('\u{0622}', ['\u{FEF5}', '\u{FEF6}']),
    ('\u{0623}', ['\u{FEF7}', '\u{FEF8}']),
    ('\u{0625}', ['\u{FEF9}', '\u{FEFA}']),
    ('\u{0627}', ['\u{FEFB}', '\u{FEFC}']),
];

const HAMZA: char = '\u{0621}';
const HAMZA_ISOLATED: char = '\u{FE80}';
const LAM: char = '\u{0644}';

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Joining {
    Dual,
    Right,
    /// Marks that do not break a join.
    Transparent,
    None,
}

#[derive(Debug, Clone, Copy)]
enum Unit {
    Char(char),
    LamAlef(char),
}

impl Unit {
    fn joining(self) -> Joining {
        match self {
            Unit::LamAlef(_) => Joining::Right,
            Unit::Char(c) => joining_of(c),
        }
    }
}

fn lookup<const N: usize>(table: &[(char, [char; N])], c: char) -> Option<[char; N]> {
    table
        .binary_search_by_key(&c, |(base, _)| *base)
        .ok()
        .map(|idx| table[idx].1)
}

fn is_harakat(c: char) -> bool {
    matches!(c, '\u{0610}'..='\u{061A}' | '\u{064B}'..='\u{065F}' | '\u{0670}')
}

fn joining_of(c: char) -> Joining {
    if is_harakat(c) {
        Joining::Transparent
    } else if lookup(DUAL_JOINING, c).is_some() {
        Joining::Dual
    } else if lookup(RIGHT_JOINING, c).is_some() {
        Joining::Right
    } else {
        Joining::None
    }
}

/// True if the text contains any character this module would reshape.
pub fn has_arabic(text: &str) -> bool {
    text.chars()
        .any(|c| c == HAMZA || matches!(joining_of(c), Joining::Dual | Joining::Right))
}

/// Replace Arabic letters with their contextual presentation forms.
///
/// Lam followed directly by an alef variant is merged into one ligature;
/// every other character maps one-to-one, so text without Arabic is
/// returned unchanged.
pub fn reshape(text: &str) -> String {
    if !has_arabic(text) {
        return text.to_string();
    }

    let chars: Vec<char> = text.chars().collect();
    let mut units = Vec::with_capacity(chars.len());
    let mut i = 0;
    while i < chars.len() {
        let c = chars[i];
        if c == LAM {
            if let Some(&next) = chars.get(i + 1) {
                if lookup(LAM_ALEF, next).is_some() {
                    units.push(Unit::LamAlef(next));
                    i += 2;
                    continue;
                }
            }
        }
        units.push(Unit::Char(c));
        i += 1;
    }

    let mut out = String::with_capacity(text.len());
    for (idx, unit) in units.iter().enumerate() {
        let joining = unit.joining();
        if let Unit::Char(c) = *unit {
            if matches!(joining, Joining::Transparent | Joining::None) {
                out.push(if c == HAMZA { HAMZA_ISOLATED } else { c });
                continue;
            }
        }

        let joins_prev = neighbour(&units, idx, Direction::Before)
            .is_some_and(|prev| prev.joining() == Joining::Dual);
        let joins_next = joining == Joining::Dual
            && neighbour(&units, idx, Direction::After)
                .is_some_and(|next| matches!(next.joining(), Joining::Dual | Joining::Right));

        out.push(shaped(*unit, joins_prev, joins_next));
    }
    out
}

enum Direction {
    Before,
    After,
}

/// Nearest non-transparent unit on one side.
fn neighbour(units: &[Unit], idx: usize, direction: Direction) -> Option<Unit> {
    let skip_marks = |u: &&Unit| u.joining() == Joining::Transparent;
    match direction {
        Direction::Before => units[..idx].iter().rev().find(|u| !skip_marks(u)).copied(),
        Direction::After => units[idx + 1..].iter().find(|u| !skip_marks(u)).copied(),
    }
}

fn shaped(unit: Unit, joins_prev: bool, joins_next: bool) -> char {
    match unit {
        Unit::LamAlef(alef) => {
            let [isolated, final_form] = lookup(LAM_ALEF, alef).unwrap_or([alef, alef]);
            if joins_prev { final_form } else { isolated }
        }
        Unit::Char(c) => {
            if let Some([isolated, final_form, initial, medial]) = lookup(DUAL_JOINING, c) {
                match (joins_prev, joins_next) {
                    (false, false) => isolated,
                    (true, false) => final_form,
                    (false, true) => initial,
                    (true, true) => medial,
                }
            } else if let Some([isolated, final_form]) = lookup(RIGHT_JOINING, c) {
                if joins_prev { final_form } else { isolated }
            } else {
                c
            }
        }
    }
}
