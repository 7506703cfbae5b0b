//! Placeholder parsing and substitution for toolchain templates.
//!
//! Toolchain arguments and environment values are written once in the
//! configuration and expanded for every target platform.
//!
//! # Placeholder Formats
//!
//! - `$${name}` - binary name
//! - `$${version}` - resolved version
//! - `$${os}` / `$${arch}` - platform identifiers (`linux`, `x86_64`, ...)
//! - `$${goos}` / `$${goarch}` - the same platform in Go's spelling (`linux`, `amd64`, ...)
//! - `$${triple}` - Rust target triple
//! - `$${output}` - artifact file name
//! - `$${exe}` - `.exe` for windows targets, empty otherwise
//!
//! # Shell Variables
//!
//! Single `$` characters pass through unchanged, so shell variables like
//! `$HOME` and `$0` work naturally without any escaping.
//!
//! # Escaping
//!
//! Use `$$$` before `{` to produce a literal `$${` sequence.
//!
//! # Example
//!
//! ```
//! use xbuild_lib::placeholder::{parse, Segment, Placeholder};
//!
//! let segments = parse("target/$${triple}/release").unwrap();
//! assert_eq!(segments, vec![
//!     Segment::Literal("target/".to_string()),
//!     Segment::Placeholder(Placeholder::Triple),
//!     Segment::Literal("/release".to_string()),
//! ]);
//! ```

use thiserror::Error;

/// A parsed placeholder reference.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Placeholder {
  Name,
  Version,
  Os,
  Arch,
  GoOs,
  GoArch,
  Triple,
  Output,
  Exe,
}

/// A segment of parsed text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Segment {
  /// Literal text (no placeholders)
  Literal(String),

  /// A placeholder to be resolved
  Placeholder(Placeholder),
}

/// Errors that can occur during placeholder parsing.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PlaceholderError {
  #[error("unclosed placeholder at position {0}")]
  Unclosed(usize),

  #[error("unknown placeholder: {0}")]
  Unknown(String),
}

/// Supplies values for placeholders.
pub trait Resolver {
  fn resolve(&self, placeholder: Placeholder) -> String;
}

/// Parse a string containing placeholders into segments.
///
/// # Errors
///
/// Returns an error if a placeholder is unclosed or names an unknown value.
pub fn parse(input: &str) -> Result<Vec<Segment>, PlaceholderError> {
  let mut segments = Vec::new();
  let mut literal = String::new();
  let mut chars = input.char_indices().peekable();

  while let Some((pos, ch)) = chars.next() {
    if ch != '$' {
      literal.push(ch);
      continue;
    }

    match chars.peek() {
      Some((_, '$')) => {
        chars.next(); // consume the second $

        match chars.peek() {
          Some((_, '$')) => {
            chars.next(); // consume the third $

            match chars.peek() {
              Some((_, '{')) => {
                // Escaped: $$${ -> $${ (literal)
                literal.push_str("$${");
                chars.next();
              }
              _ => literal.push_str("$$$"),
            }
          }
          Some((_, '{')) => {
            chars.next(); // consume the {

            if !literal.is_empty() {
              segments.push(Segment::Literal(std::mem::take(&mut literal)));
            }

            let mut content = String::new();
            let mut found_close = false;

            for (_, c) in chars.by_ref() {
              if c == '}' {
                found_close = true;
                break;
              }
              content.push(c);
            }

            if !found_close {
              return Err(PlaceholderError::Unclosed(pos));
            }

            segments.push(Segment::Placeholder(parse_placeholder_content(&content)?));
          }
          _ => literal.push_str("$$"),
        }
      }
      _ => literal.push('$'),
    }
  }

  if !literal.is_empty() {
    segments.push(Segment::Literal(literal));
  }

  Ok(segments)
}

fn parse_placeholder_content(content: &str) -> Result<Placeholder, PlaceholderError> {
  match content.trim() {
    "name" => Ok(Placeholder::Name),
    "version" => Ok(Placeholder::Version),
    "os" => Ok(Placeholder::Os),
    "arch" => Ok(Placeholder::Arch),
    "goos" => Ok(Placeholder::GoOs),
    "goarch" => Ok(Placeholder::GoArch),
    "triple" => Ok(Placeholder::Triple),
    "output" => Ok(Placeholder::Output),
    "exe" => Ok(Placeholder::Exe),
    other => Err(PlaceholderError::Unknown(other.to_string())),
  }
}

/// Parse and substitute in one step.
pub fn substitute(input: &str, resolver: &impl Resolver) -> Result<String, PlaceholderError> {
  let segments = parse(input)?;
  Ok(substitute_segments(&segments, resolver))
}

/// Substitute placeholders in pre-parsed segments.
pub fn substitute_segments(segments: &[Segment], resolver: &impl Resolver) -> String {
  let mut result = String::new();

  for segment in segments {
    match segment {
      Segment::Literal(s) => result.push_str(s),
      Segment::Placeholder(p) => result.push_str(&resolver.resolve(*p)),
    }
  }

  result
}

#[cfg(test)]
mod tests {
  use super::*;

  struct FixedResolver;

  impl Resolver for FixedResolver {
    fn resolve(&self, placeholder: Placeholder) -> String {
      match placeholder {
        Placeholder::Name => "app",
        Placeholder::Version => "1.2.3",
        Placeholder::Os => "windows",
        Placeholder::Arch => "x86_64",
        Placeholder::GoOs => "windows",
        Placeholder::GoArch => "amd64",
        Placeholder::Triple => "x86_64-pc-windows-gnu",
        Placeholder::Output => "app_1.2.3_windows-x86_64.exe",
        Placeholder::Exe => ".exe",
      }
      .to_string()
    }
  }

  #[test]
  fn cargo_produces_path() {
    let result = substitute("target/$${triple}/release/$${name}$${exe}", &FixedResolver).unwrap();
    assert_eq!(result, "target/x86_64-pc-windows-gnu/release/app.exe");
  }

  #[test]
  fn go_placeholders_use_go_spelling() {
    let result = substitute("$${goos}/$${goarch} ($${os}/$${arch})", &FixedResolver).unwrap();
    assert_eq!(result, "windows/amd64 (windows/x86_64)");
  }

  #[test]
  fn shell_variables_pass_through() {
    let result = substitute("printf '%s' \"$0\" > $${output}; echo $HOME", &FixedResolver).unwrap();
    assert_eq!(result, "printf '%s' \"$0\" > app_1.2.3_windows-x86_64.exe; echo $HOME");
  }

  #[test]
  fn escaped_placeholder_is_literal() {
    let result = substitute("$$${version} is $${version}", &FixedResolver).unwrap();
    assert_eq!(result, "$${version} is 1.2.3");
  }

  #[test]
  fn double_dollar_without_brace_is_literal() {
    assert_eq!(
      parse("echo $$ $$$x").unwrap(),
      vec![Segment::Literal("echo $$ $$$x".to_string())]
    );
  }

  #[test]
  fn unclosed_placeholder_reports_position() {
    assert_eq!(parse("abc $${version"), Err(PlaceholderError::Unclosed(4)));
  }

  #[test]
  fn unknown_placeholder_is_rejected() {
    assert_eq!(
      parse("$${action:0}"),
      Err(PlaceholderError::Unknown("action:0".to_string()))
    );
  }
}
