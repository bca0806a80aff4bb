//! Blendshape naming grammar.
//!
//! ```text
//! name       := component ("_" component)*
//! component  := head ("_" suffix)?
//! head       := lower letter{1,} digit{0,2}     e.g. jawOpen, mouthSmile25
//! suffix     := UPPER{1,2}                      e.g. L, R, LB
//! ```
//!
//! One component without digits is a direct driver, one component with
//! digits is an in-between at that percentage, and two or more components
//! name a corrective. A trailing suffix binds to the last component only:
//! `jawOpen_mouthSmile25_L` is `jawOpen` × `mouthSmile25_L`.

/// One `head[_SUFFIX]` token of a blendshape name.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Component<'a> {
    /// Lower-camel base, without digits (`mouthSmile`).
    pub base: &'a str,
    /// Percentage marker for in-betweens (`25` in `mouthSmile25_L`).
    pub percent: Option<u8>,
    /// Side suffix without the underscore (`L`).
    pub suffix: Option<&'a str>,
}

impl Component<'_> {
    /// Name of the direct driver this component refers to (`mouthSmile_L`).
    pub fn driver_name(&self) -> String {
        match self.suffix {
            Some(s) => format!("{}_{s}", self.base),
            None => self.base.to_owned(),
        }
    }

    /// Full blendshape name of this component (`mouthSmile25_L`).
    pub fn shape_name(&self) -> String {
        let mut name = self.base.to_owned();
        if let Some(p) = self.percent {
            name.push_str(&p.to_string());
        }
        if let Some(s) = self.suffix {
            name.push('_');
            name.push_str(s);
        }
        name
    }
}

/// Classification of a single blendshape name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NameClass<'a> {
    /// Pass-through driver, e.g. `jawOpen`, `mouthSmile_L`.
    Direct(Component<'a>),
    /// Shape fully on at `percent`% of its parent driver, e.g. `mouthSmile25_L`.
    InBetween(Component<'a>),
    /// Product of two or more direct or in-between shapes.
    Corrective(Vec<Component<'a>>),
}

enum Segment<'a> {
    Head { base: &'a str, percent: Option<u8> },
    Suffix(&'a str),
}

fn lex_segment(seg: &str) -> Option<Segment<'_>> {
    let bytes = seg.as_bytes();
    if (1..=2).contains(&bytes.len()) && bytes.iter().all(u8::is_ascii_uppercase) {
        return Some(Segment::Suffix(seg));
    }

    let letters = bytes.iter().take_while(|b| b.is_ascii_alphabetic()).count();
    let digits = &bytes[letters..];
    if letters < 2
        || !bytes[0].is_ascii_lowercase()
        || digits.len() > 2
        || !digits.iter().all(u8::is_ascii_digit)
    {
        return None;
    }
    let percent = if digits.is_empty() {
        None
    } else {
        // At most two ASCII digits, always fits
        seg[letters..].parse().ok()
    };
    Some(Segment::Head {
        base: &seg[..letters],
        percent,
    })
}

/// Classifies `name`, or returns `None` if it follows none of the patterns.
pub fn classify_name(name: &str) -> Option<NameClass<'_>> {
    let mut components: Vec<Component<'_>> = Vec::new();
    for seg in name.split('_') {
        match lex_segment(seg)? {
            Segment::Head { base, percent } => components.push(Component {
                base,
                percent,
                suffix: None,
            }),
            Segment::Suffix(s) => {
                let last = components.last_mut()?;
                if last.suffix.is_some() {
                    return None;
                }
                last.suffix = Some(s);
            }
        }
    }

    match components.len() {
        0 => None,
        1 if components[0].percent.is_none() => Some(NameClass::Direct(components[0])),
        1 => Some(NameClass::InBetween(components[0])),
        _ => Some(NameClass::Corrective(components)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn comp<'a>(base: &'a str, percent: Option<u8>, suffix: Option<&'a str>) -> Component<'a> {
        Component {
            base,
            percent,
            suffix,
        }
    }

    #[test]
    fn test_direct_without_suffix() {
        assert_eq!(
            classify_name("jawOpen"),
            Some(NameClass::Direct(comp("jawOpen", None, None)))
        );
    }

    #[test]
    fn test_direct_with_one_and_two_letter_suffix() {
        assert_eq!(
            classify_name("mouthSmile_L"),
            Some(NameClass::Direct(comp("mouthSmile", None, Some("L"))))
        );
        assert_eq!(
            classify_name("lipSuck_LB"),
            Some(NameClass::Direct(comp("lipSuck", None, Some("LB"))))
        );
    }

    #[test]
    fn test_in_between_one_and_two_digits() {
        assert_eq!(
            classify_name("jawOpen5"),
            Some(NameClass::InBetween(comp("jawOpen", Some(5), None)))
        );
        assert_eq!(
            classify_name("mouthSmile25_L"),
            Some(NameClass::InBetween(comp("mouthSmile", Some(25), Some("L"))))
        );
        assert_eq!(
            classify_name("jawOpen05"),
            Some(NameClass::InBetween(comp("jawOpen", Some(5), None)))
        );
    }

    #[test]
    fn test_corrective_trailing_suffix_binds_last() {
        assert_eq!(
            classify_name("jawOpen_mouthSmile25_L"),
            Some(NameClass::Corrective(vec![
                comp("jawOpen", None, None),
                comp("mouthSmile", Some(25), Some("L")),
            ]))
        );
        assert_eq!(
            classify_name("browUp_browUp_L"),
            Some(NameClass::Corrective(vec![
                comp("browUp", None, None),
                comp("browUp", None, Some("L")),
            ]))
        );
    }

    #[test]
    fn test_corrective_per_component_suffixes() {
        assert_eq!(
            classify_name("mouthSmile_L_mouthSmile_R_jawOpen50"),
            Some(NameClass::Corrective(vec![
                comp("mouthSmile", None, Some("L")),
                comp("mouthSmile", None, Some("R")),
                comp("jawOpen", Some(50), None),
            ]))
        );
    }

    #[test]
    fn test_rejects_malformed_names() {
        for name in [
            "",
            "_",
            "j",
            "JawOpen",
            "jawOpen_",
            "_jawOpen",
            "jaw__open",
            "jawOpen100",
            "jawOpen_LEFT",
            "jawOpen_L_R",
            "jawOpen_l",
            "jaw2Open",
            "jawOpen-L",
            "L",
            "L_jawOpen",
            "jawÖffnen",
        ] {
            assert_eq!(classify_name(name), None, "{name:?} should not classify");
        }
    }

    #[test]
    fn test_component_names() {
        let c = comp("mouthSmile", Some(25), Some("L"));
        assert_eq!(c.driver_name(), "mouthSmile_L");
        assert_eq!(c.shape_name(), "mouthSmile25_L");
        let d = comp("jawOpen", None, None);
        assert_eq!(d.driver_name(), "jawOpen");
        assert_eq!(d.shape_name(), "jawOpen");
    }

    #[test]
    fn test_shape_name_normalises_leading_zero() {
        // "jawOpen05" and "jawOpen5" describe the same 5% shape
        let Some(NameClass::InBetween(c)) = classify_name("jawOpen05") else {
            panic!("expected in-between");
        };
        assert_eq!(c.shape_name(), "jawOpen5");
    }
}
