//! Terminal output sanitization
//!
//! # Security: Terminal Injection Prevention
//!
//! Bug messages, explanations and code suggestions come from a remote model
//! and are printed straight to the terminal by the `analyze` command. They are
//! passed through [`sanitize_remote_text`] first so escape sequences in a
//! response cannot clear the screen, move the cursor, recolour output or set
//! the window title.

/// Strip escape sequences and control characters from server-supplied text.
///
/// Removes CSI sequences (`ESC [ ... letter`), OSC sequences (`ESC ] ... BEL`
/// or `ESC ] ... ESC \`), lone escapes, and control characters other than
/// tab, newline and carriage return.
///
/// # Examples
///
/// ```
/// use ai_debug_playground::utils::terminal::sanitize_remote_text;
///
/// assert_eq!(sanitize_remote_text("\x1b[31mRed\x1b[0m"), "Red");
/// ```
pub fn sanitize_remote_text(text: &str) -> String {
    let mut result = String::with_capacity(text.len());
    let mut chars = text.chars().peekable();

    while let Some(ch) = chars.next() {
        if ch == '\x1b' {
            match chars.peek() {
                Some('[') => {
                    chars.next();
                    while let Some(next_ch) = chars.next() {
                        if next_ch.is_ascii_alphabetic() || next_ch == '~' {
                            break;
                        }
                    }
                }
                Some(']') => {
                    chars.next();
                    while let Some(next_ch) = chars.next() {
                        if next_ch == '\x07' {
                            break;
                        }
                        if next_ch == '\x1b' && chars.peek() == Some(&'\\') {
                            chars.next();
                            break;
                        }
                    }
                }
                _ => {}
            }
            continue;
        }

        if ch.is_control() && ch != '\t' && ch != '\n' && ch != '\r' {
            continue;
        }

        result.push(ch);
    }

    result
}
