//! Reading keys from text.
//!
//! Input is a sequence of integers separated by ASCII whitespace. Keys are taken in order until
//! the input runs out or a token does not start with an integer. A token such as `12abc`
//! contributes `12` and then ends the input, the way `scanf("%d")` would. Truncation is not an
//! error; everything read up to that point is kept.

use std::{fs::File, io::Read, path::Path};

use crate::{Error, Key};

enum Scan {
    /// The whole token is an integer.
    Whole(Key),
    /// The token starts with an integer followed by something else.
    Prefix(Key),
    Invalid,
}

fn scan(token: &[u8]) -> Scan {
    let sign_len = usize::from(matches!(token.first(), Some(b'+' | b'-')));
    let digits_len = token[sign_len..]
        .iter()
        .take_while(|b| b.is_ascii_digit())
        .count();

    if digits_len == 0 {
        return Scan::Invalid;
    }

    let (number, rest) = token.split_at(sign_len + digits_len);

    // `number` is ASCII. Parsing only fails if it is out of range for `Key`.
    let Some(key) = core::str::from_utf8(number)
        .ok()
        .and_then(|s| s.parse::<Key>().ok())
    else {
        return Scan::Invalid;
    };

    if rest.is_empty() {
        Scan::Whole(key)
    } else {
        Scan::Prefix(key)
    }
}

// The separators `scanf` skips: ASCII whitespace plus vertical tab.
fn is_space(b: &u8) -> bool {
    b.is_ascii_whitespace() || *b == 0x0B
}

/// Parses keys from `input`, stopping silently at the first malformed token.
pub fn parse_keys(input: &[u8]) -> Vec<Key> {
    let mut keys = Vec::new();

    let tokens = input
        .split(is_space)
        .filter(|token| !token.is_empty());

    for token in tokens {
        match scan(token) {
            Scan::Whole(key) => keys.push(key),
            Scan::Prefix(key) => {
                keys.push(key);
                log::debug!("input truncated after {} keys: trailing garbage", keys.len());
                break;
            }
            Scan::Invalid => {
                log::debug!("input truncated after {} keys: malformed token", keys.len());
                break;
            }
        }
    }

    keys
}

/// Reads keys from the file at `path`.
pub fn read_keys(path: &Path) -> Result<Vec<Key>, Error> {
    let mut file = File::open(path).map_err(|source| Error::FileOpen {
        path: path.to_path_buf(),
        source,
    })?;

    let mut buf = Vec::new();
    file.read_to_end(&mut buf).map_err(|source| Error::Read {
        path: path.to_path_buf(),
        source,
    })?;

    let keys = parse_keys(&buf);
    log::debug!("read {} keys from {}", keys.len(), path.display());

    Ok(keys)
}
