//! Raw input bytes to logical key events.
//!
//! The decoder is a small state machine fed one byte at a time, so a
//! truncated escape sequence never blocks waiting for bytes that are not
//! coming: it simply resolves on the next keystroke.

/// One logical keystroke.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyEvent {
    Printable(char),
    Enter,
    /// The input stream closed.
    Eof,
    Backspace,
    ArrowLeft,
    ArrowRight,
    Tab,
    /// An escape sequence other than the two arrow keys; inert.
    OtherEscape,
    /// Ctrl-C.
    Interrupt,
    /// Ctrl-D.
    EndOfTransmission,
    /// A control byte with no binding.
    Ignored,
}

const ESC: u8 = 0x1b;
/// Parameter bytes accepted inside `ESC [` before giving up on a sequence.
const MAX_CSI_PARAMS: usize = 16;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum DecodeState {
    Normal,
    EscapeStart,
    EscapeBracket { params: usize },
    EscapeSs3,
    Utf8 { bytes: [u8; 4], have: usize, need: usize },
}

/// Incremental byte decoder.
#[derive(Debug, Clone)]
pub struct KeyDecoder {
    state: DecodeState,
}

impl Default for KeyDecoder {
    fn default() -> Self {
        Self::new()
    }
}

impl KeyDecoder {
    pub fn new() -> Self {
        Self {
            state: DecodeState::Normal,
        }
    }

    /// Feed one byte; returns an event once a key is complete.
    pub fn feed(&mut self, byte: u8) -> Option<KeyEvent> {
        match self.state {
            DecodeState::Normal => self.feed_normal(byte),
            DecodeState::EscapeStart => {
                self.state = match byte {
                    b'[' => DecodeState::EscapeBracket { params: 0 },
                    b'O' => DecodeState::EscapeSs3,
                    _ => {
                        return self.reset_with(KeyEvent::OtherEscape);
                    }
                };
                None
            }
            DecodeState::EscapeBracket { params } => match byte {
                b'C' if params == 0 => self.reset_with(KeyEvent::ArrowRight),
                b'D' if params == 0 => self.reset_with(KeyEvent::ArrowLeft),
                // Parameter/intermediate bytes of a longer CSI sequence.
                0x20..=0x3f if params < MAX_CSI_PARAMS => {
                    self.state = DecodeState::EscapeBracket { params: params + 1 };
                    None
                }
                _ => self.reset_with(KeyEvent::OtherEscape),
            },
            DecodeState::EscapeSs3 => self.reset_with(KeyEvent::OtherEscape),
            DecodeState::Utf8 {
                mut bytes,
                have,
                need,
            } => {
                if byte & 0xc0 != 0x80 {
                    // Broken sequence: drop it and decode this byte afresh.
                    self.state = DecodeState::Normal;
                    return self.feed_normal(byte);
                }
                bytes[have] = byte;
                if have + 1 < need {
                    self.state = DecodeState::Utf8 {
                        bytes,
                        have: have + 1,
                        need,
                    };
                    return None;
                }
                let event = std::str::from_utf8(&bytes[..need])
                    .ok()
                    .and_then(|s| s.chars().next())
                    .map(KeyEvent::Printable)
                    .unwrap_or(KeyEvent::Ignored);
                self.reset_with(event)
            }
        }
    }

    /// The stream ended; any partial sequence is dropped.
    pub fn finish(&mut self) -> KeyEvent {
        self.state = DecodeState::Normal;
        KeyEvent::Eof
    }

    fn feed_normal(&mut self, byte: u8) -> Option<KeyEvent> {
        let event = match byte {
            b'\n' | b'\r' => KeyEvent::Enter,
            0x7f | 0x08 => KeyEvent::Backspace,
            b'\t' => KeyEvent::Tab,
            0x03 => KeyEvent::Interrupt,
            0x04 => KeyEvent::EndOfTransmission,
            ESC => {
                self.state = DecodeState::EscapeStart;
                return None;
            }
            0x00..=0x1f => KeyEvent::Ignored,
            0x20..=0x7e => KeyEvent::Printable(byte as char),
            0xc2..=0xf4 => {
                let need = match byte {
                    0xc2..=0xdf => 2,
                    0xe0..=0xef => 3,
                    _ => 4,
                };
                let mut bytes = [0u8; 4];
                bytes[0] = byte;
                self.state = DecodeState::Utf8 {
                    bytes,
                    have: 1,
                    need,
                };
                return None;
            }
            _ => KeyEvent::Ignored,
        };
        Some(event)
    }

    fn reset_with(&mut self, event: KeyEvent) -> Option<KeyEvent> {
        self.state = DecodeState::Normal;
        Some(event)
    }
}
