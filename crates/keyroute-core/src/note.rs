//! Note-number arithmetic for the on-screen keyboard.

/// Semitones per octave.
pub const NOTES_PER_OCTAVE: i32 = 12;

/// Highest valid MIDI note number.
pub const MAX_NOTE: u8 = 127;

/// Pitch classes drawn as black keys (C#, D#, F#, G#, A#).
const BLACK_PITCH_CLASSES: [i32; 5] = [1, 3, 6, 8, 10];

/// Computes the note for a key at the given octave offset.
///
/// `note = key_index + octave * 12`. Returns `None` when the result falls
/// outside `0..=127`; such notes are rejected rather than clamped to a
/// different pitch.
///
/// ```rust
/// use keyroute_core::key_note;
///
/// assert_eq!(key_note(60, 0), Some(60));
/// assert_eq!(key_note(60, -2), Some(36));
/// assert_eq!(key_note(120, 1), None);
/// ```
#[inline]
pub fn key_note(key_index: u8, octave: i8) -> Option<u8> {
    let note = i32::from(key_index) + i32::from(octave) * NOTES_PER_OCTAVE;
    u8::try_from(note).ok().filter(|n| *n <= MAX_NOTE)
}

/// Returns true if the key index sits on a black key.
///
/// ```rust
/// use keyroute_core::is_black_key;
///
/// assert!(is_black_key(49));
/// assert!(!is_black_key(48));
/// ```
#[inline]
pub fn is_black_key(key_index: u8) -> bool {
    BLACK_PITCH_CLASSES.contains(&(i32::from(key_index) % NOTES_PER_OCTAVE))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_key_note_octave_offsets() {
        assert_eq!(key_note(48, 3), Some(84));
        assert_eq!(key_note(48, -3), Some(12));
        assert_eq!(key_note(0, 0), Some(0));
        assert_eq!(key_note(127, 0), Some(127));
    }

    #[test]
    fn test_key_note_rejects_out_of_range() {
        assert_eq!(key_note(10, -1), None);
        assert_eq!(key_note(127, 1), None);
        assert_eq!(key_note(200, 0), None);
    }

    #[test]
    fn test_black_keys_match_keyboard_layout() {
        // Black keys of the two-octave keyboard starting at C3 (48).
        let black = [49, 51, 54, 56, 58, 61, 63, 66, 68, 70];
        for key in 48..=72u8 {
            assert_eq!(is_black_key(key), black.contains(&key), "key {key}");
        }
    }
}
