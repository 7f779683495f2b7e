//! Note events consumed by the synth.
//!
//! Hosts deliver events with a sample offset inside the block. The synth
//! applies them at block granularity, in the order given, so the offset only
//! matters for sorting.

/// A note or channel-mode message.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoteEvent {
    /// Start a note. Velocity is carried but does not affect the sound.
    NoteOn {
        /// MIDI note number.
        note: u8,
        /// MIDI velocity, 1 – 127.
        velocity: u8,
    },
    /// Release the sounding note. The note number is not matched.
    NoteOff {
        /// MIDI note number.
        note: u8,
    },
    /// MIDI CC 123.
    AllNotesOff,
    /// MIDI CC 120.
    AllSoundOff,
}

const STATUS_NOTE_OFF: u8 = 0x80;
const STATUS_NOTE_ON: u8 = 0x90;
const STATUS_CONTROL_CHANGE: u8 = 0xB0;
const CC_ALL_SOUND_OFF: u8 = 120;
const CC_ALL_NOTES_OFF: u8 = 123;

impl NoteEvent {
    /// Decode a raw channel-voice MIDI message on any channel.
    ///
    /// A note-on with velocity 0 is a note-off. Messages the synth does not
    /// react to decode to `None`.
    ///
    /// ```rust
    /// use sub808_synth::NoteEvent;
    ///
    /// assert_eq!(
    ///     NoteEvent::from_midi(&[0x91, 36, 100]),
    ///     Some(NoteEvent::NoteOn { note: 36, velocity: 100 })
    /// );
    /// assert_eq!(NoteEvent::from_midi(&[0x90, 36, 0]), Some(NoteEvent::NoteOff { note: 36 }));
    /// assert_eq!(NoteEvent::from_midi(&[0xB0, 123, 0]), Some(NoteEvent::AllNotesOff));
    /// assert_eq!(NoteEvent::from_midi(&[0xE0, 0, 64]), None);
    /// ```
    pub fn from_midi(bytes: &[u8]) -> Option<Self> {
        let &[status, data1, data2, ..] = bytes else {
            return None;
        };
        let (data1, data2) = (data1 & 0x7F, data2 & 0x7F);
        match status & 0xF0 {
            STATUS_NOTE_ON if data2 > 0 => Some(NoteEvent::NoteOn {
                note: data1,
                velocity: data2,
            }),
            STATUS_NOTE_ON | STATUS_NOTE_OFF => Some(NoteEvent::NoteOff { note: data1 }),
            STATUS_CONTROL_CHANGE => match data1 {
                CC_ALL_SOUND_OFF => Some(NoteEvent::AllSoundOff),
                CC_ALL_NOTES_OFF => Some(NoteEvent::AllNotesOff),
                _ => None,
            },
            _ => None,
        }
    }
}

/// A [`NoteEvent`] at a sample offset within the current block.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TimedEvent {
    /// Sample offset from the start of the block.
    pub time: u32,
    /// The event.
    pub event: NoteEvent,
}

impl TimedEvent {
    /// Event at `time`.
    pub const fn new(time: u32, event: NoteEvent) -> Self {
        Self { time, event }
    }

    /// Note-on at the start of the block.
    pub const fn note_on(note: u8, velocity: u8) -> Self {
        Self::new(0, NoteEvent::NoteOn { note, velocity })
    }

    /// Note-off at the start of the block.
    pub const fn note_off(note: u8) -> Self {
        Self::new(0, NoteEvent::NoteOff { note })
    }
}
