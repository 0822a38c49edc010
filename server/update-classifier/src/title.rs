//! Dependabot-style PR title parsing.

/// Package and versions extracted from a PR title.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedTitle {
  pub package_name: String,
  pub old_version: String,
  pub new_version: String,
}

const VERBS: &[&str] = &["bump", "update", "upgrade"];

/// Parse `[prefix: ]Bump <pkg> from <old> to <new>[ in <dir>]`.
///
/// Keywords are case-insensitive. A leading `v` before a digit is dropped from versions
/// (`actions/checkout from v3 to v4`).
pub fn parse_title(title: &str) -> Option<ParsedTitle> {
  let tokens: Vec<&str> = title.split_whitespace().collect();
  tokens
    .iter()
    .enumerate()
    .filter(|(_, t)| VERBS.iter().any(|v| t.eq_ignore_ascii_case(v)))
    .find_map(|(verb, _)| parse_after_verb(&tokens, verb))
}

fn parse_after_verb(tokens: &[&str], verb: usize) -> Option<ParsedTitle> {
  let rest = tokens.get(verb + 1..verb + 6)?;
  if !rest[1].eq_ignore_ascii_case("from") || !rest[3].eq_ignore_ascii_case("to") {
    return None;
  }

  Some(ParsedTitle {
    package_name: rest[0].to_string(),
    old_version: clean_version(rest[2]),
    new_version: clean_version(rest[4]),
  })
}

fn clean_version(raw: &str) -> String {
  let v = raw.trim_end_matches(|c: char| c == ',' || c == ';' || c == ')');
  match v.strip_prefix('v').or_else(|| v.strip_prefix('V')) {
    Some(rest) if rest.starts_with(|c: char| c.is_ascii_digit()) => rest.to_string(),
    _ => v.to_string(),
  }
}
