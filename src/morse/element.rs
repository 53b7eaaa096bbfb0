//! Primitive playback elements and timing tables
//!
//! All durations are expressed in samples and derived from a single base
//! unit, the dit duration. The ratios are the standard Morse proportions:
//! dah = 3 units, inter-element gap = 1 unit, letter break = 3 units,
//! word break = 7 units. Changing the base unit rescales the whole system
//! uniformly.

/// One unit of playback: a tone or a silent gap.
///
/// Breaks are enqueued as ordinary elements and play out in full, serially;
/// consecutive gaps never coalesce.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Element {
    /// Short tone, one unit
    Dit,
    /// Long tone, three units
    Dah,
    /// Silence separating two letters (three units; the trailing
    /// inter-element gap brings the net letter spacing to the
    /// conventional total)
    LetterBreak,
    /// Silence separating two words (seven units)
    WordBreak,
}

impl Element {
    /// Whether this element produces tone output.
    #[inline]
    pub fn is_audible(self) -> bool {
        matches!(self, Element::Dit | Element::Dah)
    }
}

/// Element durations in samples, derived from the dit duration.
///
/// There are exactly two timing tables: [`Timing::standard`], the runtime
/// table used against a real audio device, and [`Timing::from_dit_samples`],
/// an arbitrary fixed-dit table for deterministic tests. There is no
/// adjustable keying speed.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Timing {
    dit: u64,
}

impl Timing {
    /// The runtime timing table: dit lasts a tenth of a second.
    pub fn standard(sample_rate: u32) -> Self {
        Self {
            dit: 10 * u64::from(sample_rate) / 100,
        }
    }

    /// A timing table with an explicit dit duration in samples.
    pub fn from_dit_samples(dit: u64) -> Self {
        Self { dit }
    }

    /// Dit duration (the base unit).
    #[inline]
    pub fn dit(&self) -> u64 {
        self.dit
    }

    /// Dah duration, three units.
    #[inline]
    pub fn dah(&self) -> u64 {
        3 * self.dit
    }

    /// Mandatory silence between elements within a letter, one unit.
    #[inline]
    pub fn inter_element_gap(&self) -> u64 {
        self.dit
    }

    /// Letter-break duration, three units.
    #[inline]
    pub fn letter_break(&self) -> u64 {
        3 * self.dit
    }

    /// Word-break duration, seven units.
    #[inline]
    pub fn word_break(&self) -> u64 {
        7 * self.dit
    }

    /// Duration of one element under this table.
    #[inline]
    pub fn duration_of(&self, element: Element) -> u64 {
        match element {
            Element::Dit => self.dit(),
            Element::Dah => self.dah(),
            Element::LetterBreak => self.letter_break(),
            Element::WordBreak => self.word_break(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_standard_table_dit_is_tenth_of_second() {
        let timing = Timing::standard(44_100);
        assert_eq!(timing.dit(), 4_410);
    }

    #[test]
    fn test_duration_ratios() {
        for timing in [Timing::standard(44_100), Timing::from_dit_samples(50)] {
            assert_eq!(timing.dah(), 3 * timing.dit());
            assert_eq!(timing.inter_element_gap(), timing.dit());
            assert_eq!(timing.letter_break(), 3 * timing.dit());
            assert_eq!(timing.word_break(), 7 * timing.dit());
        }
    }

    #[test]
    fn test_duration_of_matches_accessors() {
        let timing = Timing::from_dit_samples(50);
        assert_eq!(timing.duration_of(Element::Dit), 50);
        assert_eq!(timing.duration_of(Element::Dah), 150);
        assert_eq!(timing.duration_of(Element::LetterBreak), 150);
        assert_eq!(timing.duration_of(Element::WordBreak), 350);
    }

    #[test]
    fn test_audibility() {
        assert!(Element::Dit.is_audible());
        assert!(Element::Dah.is_audible());
        assert!(!Element::LetterBreak.is_audible());
        assert!(!Element::WordBreak.is_audible());
    }
}
