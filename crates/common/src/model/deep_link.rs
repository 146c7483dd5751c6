use std::cmp::Ordering;
use std::rc::Rc;

use indexmap::IndexMap;
use regex::Regex;

use crate::error::{NavError, Result};
use crate::model::argument::NavArgument;
use crate::model::bundle::Bundle;
use crate::model::destination::NavDestination;

/// An external navigation request: a URI, an intent-style action string, a
/// mime type, or any combination of the three.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DeepLinkRequest {
    uri: Option<String>,
    action: Option<String>,
    mime_type: Option<String>,
}

impl DeepLinkRequest {
    pub fn new(
        uri: Option<String>,
        action: Option<String>,
        mime_type: Option<String>,
    ) -> Result<Self> {
        if let Some(action) = &action {
            if action.is_empty() {
                return Err(NavError::invalid_argument(
                    "deep link request cannot have an empty action",
                ));
            }
        }
        if let Some(mime_type) = &mime_type {
            validate_mime_type(mime_type)?;
        }
        Ok(DeepLinkRequest { uri, action, mime_type })
    }

    pub fn from_uri(uri: impl Into<String>) -> Self {
        DeepLinkRequest { uri: Some(uri.into()), action: None, mime_type: None }
    }

    pub fn from_action(action: impl Into<String>) -> Result<Self> {
        DeepLinkRequest::new(None, Some(action.into()), None)
    }

    pub fn from_mime_type(mime_type: impl Into<String>) -> Result<Self> {
        DeepLinkRequest::new(None, None, Some(mime_type.into()))
    }

    pub fn uri(&self) -> Option<&str> {
        self.uri.as_deref()
    }

    pub fn action(&self) -> Option<&str> {
        self.action.as_deref()
    }

    pub fn mime_type(&self) -> Option<&str> {
        self.mime_type.as_deref()
    }
}

/// One deep-link pattern registered on a destination.
///
/// Supported pattern features, mirroring the stock navigation library:
/// scheme-less patterns implicitly match `http` and `https`, `{name}`
/// placeholders capture one or more characters into the argument bundle, and
/// bare `.*` segments match zero or more characters without capturing.
#[derive(Debug, Clone)]
pub struct NavDeepLink {
    uri_pattern: Option<String>,
    uri_regex: Option<Regex>,
    arg_names: Vec<String>,
    exact: bool,
    action: Option<String>,
    mime_type: Option<String>,
}

impl NavDeepLink {
    pub fn from_uri_pattern(pattern: impl Into<String>) -> Result<Self> {
        NavDeepLink::new(Some(pattern.into()), None, None)
    }

    pub fn new(
        uri_pattern: Option<String>,
        action: Option<String>,
        mime_type: Option<String>,
    ) -> Result<Self> {
        if uri_pattern.is_none() && action.is_none() && mime_type.is_none() {
            return Err(NavError::invalid_argument(
                "deep link must have a uri pattern, an action, or a mime type",
            ));
        }
        if let Some(action) = &action {
            if action.is_empty() {
                return Err(NavError::invalid_argument("deep link action cannot be empty"));
            }
        }
        if let Some(mime_type) = &mime_type {
            validate_mime_type(mime_type)?;
        }
        let mut link = NavDeepLink {
            uri_pattern: None,
            uri_regex: None,
            arg_names: Vec::new(),
            exact: true,
            action,
            mime_type,
        };
        if let Some(pattern) = uri_pattern {
            link.compile_pattern(&pattern)?;
            link.uri_pattern = Some(pattern);
        }
        Ok(link)
    }

    pub fn uri_pattern(&self) -> Option<&str> {
        self.uri_pattern.as_deref()
    }

    pub fn action(&self) -> Option<&str> {
        self.action.as_deref()
    }

    pub fn mime_type(&self) -> Option<&str> {
        self.mime_type.as_deref()
    }

    /// Whether the pattern contains no wildcards and no placeholders.
    pub fn is_exact(&self) -> bool {
        self.exact
    }

    fn compile_pattern(&mut self, pattern: &str) -> Result<()> {
        let mut regex = String::from("^");
        if !has_scheme(pattern) {
            // Scheme-less patterns implicitly match http and https.
            regex.push_str("(?:https?://)");
        }
        let placeholder = Regex::new(r"\{(.+?)\}").expect("placeholder regex");
        let mut last = 0;
        for caps in placeholder.captures_iter(pattern) {
            let whole = caps.get(0).expect("match");
            let name = caps.get(1).expect("group").as_str();
            self.append_literal(&mut regex, &pattern[last..whole.start()]);
            regex.push_str("(.+?)");
            self.arg_names.push(name.to_string());
            self.exact = false;
            last = whole.end();
        }
        self.append_literal(&mut regex, &pattern[last..]);
        regex.push('$');
        let compiled = Regex::new(&regex).map_err(|e| {
            NavError::invalid_argument(format!("malformed deep link pattern {pattern}: {e}"))
        })?;
        self.uri_regex = Some(compiled);
        Ok(())
    }

    fn append_literal(&mut self, regex: &mut String, literal: &str) {
        let mut pieces = literal.split(".*").peekable();
        while let Some(piece) = pieces.next() {
            regex.push_str(&regex::escape(piece));
            if pieces.peek().is_some() {
                regex.push_str(".*");
                self.exact = false;
            }
        }
    }

    /// Match `uri` against this pattern, extracting placeholder values into a
    /// bundle. Placeholders whose name is declared as an argument on the
    /// destination are parsed through the declared type; a failed parse
    /// rejects the whole match.
    pub fn matching_arguments(
        &self,
        uri: &str,
        declared: &IndexMap<String, NavArgument>,
    ) -> Option<Bundle> {
        let regex = self.uri_regex.as_ref()?;
        let captures = regex.captures(uri)?;
        let mut bundle = Bundle::new();
        for (index, name) in self.arg_names.iter().enumerate() {
            let raw = captures.get(index + 1)?.as_str();
            match declared.get(name) {
                Some(argument) => {
                    let value = argument.ty().parse(raw)?;
                    bundle.insert(name.clone(), value);
                }
                None => bundle.put_str(name.clone(), raw),
            }
        }
        Some(bundle)
    }

    /// Rate how specifically this link's mime type matches the request's.
    /// `None` means no match; higher ratings are finer grained
    /// (`image/jpg` beats `image/*` beats `*/*`).
    pub fn mime_type_match_rating(&self, request_mime: &str) -> Option<i32> {
        let pattern = self.mime_type.as_deref()?;
        let (pat_ty, pat_sub) = split_mime(pattern)?;
        let (req_ty, req_sub) = split_mime(request_mime)?;
        let mut rating = 0;
        if pat_ty == req_ty {
            rating += 2;
        } else if pat_ty != "*" {
            return None;
        }
        if pat_sub == req_sub {
            rating += 1;
        } else if pat_sub != "*" {
            return None;
        }
        Some(rating)
    }
}

/// The winner of matching a request against a destination's deep links,
/// carrying everything the ranking in [`DeepLinkMatch::cmp_specificity`]
/// needs.
#[derive(Debug, Clone)]
pub struct DeepLinkMatch {
    destination: Rc<NavDestination>,
    matching_args: Option<Bundle>,
    exact: bool,
    has_matching_action: bool,
    mime_match_level: i32,
}

impl DeepLinkMatch {
    pub(crate) fn new(
        destination: Rc<NavDestination>,
        matching_args: Option<Bundle>,
        exact: bool,
        has_matching_action: bool,
        mime_match_level: i32,
    ) -> Self {
        DeepLinkMatch { destination, matching_args, exact, has_matching_action, mime_match_level }
    }

    pub fn destination(&self) -> &Rc<NavDestination> {
        &self.destination
    }

    pub fn matching_args(&self) -> Option<&Bundle> {
        self.matching_args.as_ref()
    }

    /// Tie-break order: exact beats wildcard, any extracted arguments beat
    /// none, more arguments beat fewer, a matching action beats none, and a
    /// finer mime-type match wins last.
    pub fn cmp_specificity(&self, other: &DeepLinkMatch) -> Ordering {
        self.ranking().cmp(&other.ranking())
    }

    fn ranking(&self) -> (bool, bool, usize, bool, i32) {
        (
            self.exact,
            self.matching_args.is_some(),
            self.matching_args.as_ref().map_or(0, Bundle::len),
            self.has_matching_action,
            self.mime_match_level,
        )
    }
}

fn validate_mime_type(mime_type: &str) -> Result<()> {
    let ok = split_mime(mime_type).is_some_and(|(ty, sub)| {
        let valid = |s: &str| {
            !s.is_empty()
                && s.chars().all(|c| c.is_alphanumeric() || matches!(c, '-' | '_' | '*' | '.' | '+'))
        };
        valid(ty) && valid(sub)
    });
    if ok {
        Ok(())
    } else {
        Err(NavError::invalid_argument(format!(
            "mime type {mime_type} does not match the required type/subtype format"
        )))
    }
}

fn split_mime(mime: &str) -> Option<(&str, &str)> {
    mime.split_once('/')
}

fn has_scheme(pattern: &str) -> bool {
    for (index, c) in pattern.char_indices() {
        match c {
            ':' => return index > 0,
            c if c.is_ascii_alphanumeric() || matches!(c, '+' | '-' | '.') => {}
            _ => return false,
        }
    }
    false
}
