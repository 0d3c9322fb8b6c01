use crate::locate::locate;
use crate::placeholder::PlaceholderSpec;
use crate::substitute::{encode_replacement, substitute};
use crate::ComposerError;
use careform_types::{Section, SectionTexts};
use serde::{Deserialize, Serialize};

/// What to do when a declared placeholder does not occur in the template.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MissingPlaceholderPolicy {
    /// Abort the merge with `PlaceholderNotFound`.
    #[default]
    Fail,
    /// Log a warning, record the section and leave it unmodified.
    Warn,
}

/// A lossy patch: the encoded text did not fit its region.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Truncation {
    pub section: Section,
    pub offset: usize,
    pub encoded_len: usize,
    pub kept_len: usize,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct PatchReport {
    /// Patched regions as `(section, offset)`, in buffer order.
    pub patched: Vec<(Section, usize)>,
    pub truncations: Vec<Truncation>,
    /// Sections whose placeholder was absent (only under `Warn`).
    pub missing: Vec<Section>,
}

#[derive(Debug, Clone, Copy)]
struct Region {
    section: Section,
    offset: usize,
    len: usize,
}

/// Applies a template's placeholder specs to a buffer it does not resize.
#[derive(Debug, Clone)]
pub struct PlaceholderPatcher<'a> {
    specs: &'a [PlaceholderSpec],
    policy: MissingPlaceholderPolicy,
}

impl<'a> PlaceholderPatcher<'a> {
    pub fn new(specs: &'a [PlaceholderSpec]) -> Self {
        Self {
            specs,
            policy: MissingPlaceholderPolicy::default(),
        }
    }

    pub fn with_policy(mut self, policy: MissingPlaceholderPolicy) -> Self {
        self.policy = policy;
        self
    }

    /// Locates every region first, checks them, then writes them.
    ///
    /// Nothing is written unless every region is in bounds, correctly padded
    /// and disjoint from every other region.
    pub fn apply(
        &self,
        buffer: &mut [u8],
        texts: &SectionTexts,
    ) -> Result<PatchReport, ComposerError> {
        let mut report = PatchReport::default();
        let mut regions = Vec::new();

        for spec in self.specs {
            let before = regions.len();
            for offset in locate(buffer, spec.token()) {
                self.check_region(buffer, spec, offset)?;
                regions.push(Region {
                    section: spec.section(),
                    offset,
                    len: spec.fixed_length(),
                });
            }

            if regions.len() == before {
                match self.policy {
                    MissingPlaceholderPolicy::Fail => {
                        return Err(ComposerError::PlaceholderNotFound {
                            section: spec.section(),
                        });
                    }
                    MissingPlaceholderPolicy::Warn => {
                        log::warn!(
                            "Placeholder for {} not found; the section is left unmodified",
                            spec.section()
                        );
                        report.missing.push(spec.section());
                    }
                }
            } else {
                log::debug!(
                    "Located {} placeholder region(s) for {}",
                    regions.len() - before,
                    spec.section()
                );
            }
        }

        regions.sort_by_key(|r| r.offset);
        if let Some(pair) = regions.windows(2).find(|w| w[0].offset + w[0].len > w[1].offset) {
            return Err(ComposerError::OverlappingPlaceholders {
                first: pair[0].section,
                first_offset: pair[0].offset,
                second: pair[1].section,
                second_offset: pair[1].offset,
            });
        }

        for region in regions {
            let replacement = encode_replacement(texts.get(region.section));
            let fitted = substitute(buffer, region.offset, region.len, &replacement)?;
            if fitted.truncated() {
                log::warn!(
                    "{} text truncated from {} to {} bytes at offset {}",
                    region.section,
                    fitted.encoded_len,
                    fitted.kept_len,
                    region.offset
                );
                report.truncations.push(Truncation {
                    section: region.section,
                    offset: region.offset,
                    encoded_len: fitted.encoded_len,
                    kept_len: fitted.kept_len,
                });
            }
            report.patched.push((region.section, region.offset));
        }

        Ok(report)
    }

    fn check_region(
        &self,
        buffer: &[u8],
        spec: &PlaceholderSpec,
        offset: usize,
    ) -> Result<(), ComposerError> {
        let end = offset + spec.fixed_length();
        if end > buffer.len() {
            return Err(ComposerError::OutOfBounds {
                offset,
                end,
                len: buffer.len(),
            });
        }
        let mismatch = ComposerError::PlaceholderMismatch {
            section: spec.section(),
            offset,
        };
        let tail = &buffer[offset + spec.token().len()..end];
        if tail.iter().any(|b| *b != b' ') {
            return Err(mismatch);
        }
        // A filler run must match the template's run exactly, not a slice of a longer one.
        if let Some(fill) = spec.fill_byte() {
            let before = offset.checked_sub(1).map(|i| buffer[i]);
            let after = buffer.get(offset + spec.token().len()).copied();
            if before == Some(fill) || after == Some(fill) {
                return Err(mismatch);
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn template(parts: &[&[u8]]) -> Vec<u8> {
        parts.concat()
    }

    fn specs(lengths: [usize; 3]) -> Vec<PlaceholderSpec> {
        vec![
            PlaceholderSpec::repeated(Section::Beliefs, b'a', lengths[0]).unwrap(),
            PlaceholderSpec::repeated(Section::Values, b'b', lengths[1]).unwrap(),
            PlaceholderSpec::repeated(Section::Wishes, b'c', lengths[2]).unwrap(),
        ]
    }

    #[test]
    fn patches_each_section_into_its_own_region() {
        let mut buffer = template(&[b"(", &[b'a'; 8], b") (", &[b'b'; 6], b") (", &[b'c'; 4], b")"]);
        let original_len = buffer.len();
        let texts = SectionTexts::new("faith", "kin", "home");

        let report = PlaceholderPatcher::new(&specs([8, 6, 4]))
            .apply(&mut buffer, &texts)
            .unwrap();

        assert_eq!(buffer.len(), original_len);
        assert_eq!(&buffer, b"(faith   ) (kin   ) (home)");
        assert_eq!(report.patched.len(), 3);
        assert!(report.truncations.is_empty());
        assert!(report.missing.is_empty());
    }

    #[test]
    fn missing_placeholder_fails_by_default() {
        let mut buffer = template(&[b"(", &[b'a'; 8], b")"]);
        let untouched = buffer.clone();
        let err = PlaceholderPatcher::new(&specs([8, 6, 4]))
            .apply(&mut buffer, &SectionTexts::default())
            .unwrap_err();

        assert!(matches!(err, ComposerError::PlaceholderNotFound { section: Section::Values }));
        assert_eq!(buffer, untouched);
    }

    #[test]
    fn missing_placeholder_can_be_downgraded_to_a_warning() {
        let mut buffer = template(&[b"(", &[b'a'; 8], b")"]);
        let report = PlaceholderPatcher::new(&specs([8, 6, 4]))
            .with_policy(MissingPlaceholderPolicy::Warn)
            .apply(&mut buffer, &SectionTexts::new("ok", "", ""))
            .unwrap();

        assert_eq!(report.missing, vec![Section::Values, Section::Wishes]);
        assert_eq!(&buffer, b"(ok      )");
    }

    #[test]
    fn overflowing_text_is_truncated_and_reported() {
        let mut buffer = template(&[b"(", &[b'a'; 4], b")"]);
        let specs = vec![PlaceholderSpec::repeated(Section::Beliefs, b'a', 4).unwrap()];
        let report = PlaceholderPatcher::new(&specs)
            .apply(&mut buffer, &SectionTexts::new("abcdef", "", ""))
            .unwrap();

        assert_eq!(&buffer, b"(abcd)");
        assert_eq!(
            report.truncations,
            vec![Truncation {
                section: Section::Beliefs,
                offset: 1,
                encoded_len: 6,
                kept_len: 4
            }]
        );
    }

    #[test]
    fn marker_tokens_cover_their_padding() {
        let mut buffer = b"([[B]]      ) Tj".to_vec();
        let specs = vec![PlaceholderSpec::new(Section::Beliefs, "[[B]]", 11).unwrap()];
        PlaceholderPatcher::new(&specs)
            .apply(&mut buffer, &SectionTexts::new("hello world", "", ""))
            .unwrap();
        assert_eq!(&buffer, b"(hello world) Tj");
    }

    #[test]
    fn marker_without_padding_is_a_mismatch() {
        let mut buffer = b"([[B]]xx) Tj".to_vec();
        let specs = vec![PlaceholderSpec::new(Section::Beliefs, "[[B]]", 7).unwrap()];
        let err = PlaceholderPatcher::new(&specs)
            .apply(&mut buffer, &SectionTexts::default())
            .unwrap_err();
        assert!(matches!(err, ComposerError::PlaceholderMismatch { offset: 1, .. }));
    }

    #[test]
    fn filler_run_longer_than_its_token_is_a_mismatch() {
        let mut buffer = template(&[b"(", &[b'a'; 12], b") Tj"]);
        let untouched = buffer.clone();
        let specs = vec![PlaceholderSpec::repeated(Section::Beliefs, b'a', 8).unwrap()];
        let err = PlaceholderPatcher::new(&specs)
            .apply(&mut buffer, &SectionTexts::new("hi", "", ""))
            .unwrap_err();
        assert!(matches!(
            err,
            ComposerError::PlaceholderMismatch { section: Section::Beliefs, offset: 1 }
        ));
        assert_eq!(buffer, untouched);
    }

    #[test]
    fn doubled_filler_run_is_not_patched_twice() {
        let mut buffer = template(&[b"(", &[b'a'; 8], b")"]);
        let specs = vec![PlaceholderSpec::repeated(Section::Beliefs, b'a', 4).unwrap()];
        let err = PlaceholderPatcher::new(&specs)
            .apply(&mut buffer, &SectionTexts::new("hi", "", ""))
            .unwrap_err();
        assert!(matches!(err, ComposerError::PlaceholderMismatch { .. }));
    }

    #[test]
    fn overlapping_regions_are_rejected() {
        let mut buffer = b"(XY    ) Tj".to_vec();
        let specs = vec![
            PlaceholderSpec::new(Section::Beliefs, "XY", 6).unwrap(),
            PlaceholderSpec::new(Section::Values, "Y", 1).unwrap(),
        ];
        let err = PlaceholderPatcher::new(&specs)
            .apply(&mut buffer, &SectionTexts::default())
            .unwrap_err();
        assert!(matches!(err, ComposerError::OverlappingPlaceholders { .. }));
        assert_eq!(&buffer, b"(XY    ) Tj");
    }

    #[test]
    fn every_occurrence_of_a_token_is_patched() {
        let mut buffer = b"(aaa) (aaa)".to_vec();
        let specs = vec![PlaceholderSpec::repeated(Section::Beliefs, b'a', 3).unwrap()];
        let report = PlaceholderPatcher::new(&specs)
            .apply(&mut buffer, &SectionTexts::new("xy", "", ""))
            .unwrap();
        assert_eq!(&buffer, b"(xy ) (xy )");
        assert_eq!(report.patched, vec![(Section::Beliefs, 1), (Section::Beliefs, 7)]);
    }
}
