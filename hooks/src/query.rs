//! Media query parsing and evaluation.

use std::fmt;
use std::str::FromStr;
use std::sync::LazyLock;

use regex::Regex;
use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};

use crate::error::MediaQueryError;

static FEATURE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^\(\s*([a-z-]+)\s*:\s*([^()]+?)\s*\)$").expect("Invalid regex")
});

static AND: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\s+and\s+").expect("Invalid regex"));

static LENGTH: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^([0-9]+(?:\.[0-9]+)?)(px|em|rem)?$").expect("Invalid regex"));

/// Pixels per `em`/`rem` at the default root font size.
const PX_PER_EM: f64 = 16.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, Display, EnumString)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum ColorScheme {
    #[default]
    Light,
    Dark,
}

/// The state media features are evaluated against.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Viewport {
    /// Width in CSS pixels.
    pub width: u32,
    /// Height in CSS pixels.
    pub height: u32,
    #[serde(default)]
    pub color_scheme: ColorScheme,
    #[serde(default)]
    pub reduced_motion: bool,
}

impl Viewport {
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            color_scheme: ColorScheme::Light,
            reduced_motion: false,
        }
    }

    pub fn with_color_scheme(mut self, scheme: ColorScheme) -> Self {
        self.color_scheme = scheme;
        self
    }

    pub fn with_reduced_motion(mut self, reduced: bool) -> Self {
        self.reduced_motion = reduced;
        self
    }

    /// Portrait when the height is at least the width.
    pub fn is_portrait(&self) -> bool {
        self.height >= self.width
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, EnumString)]
#[strum(serialize_all = "lowercase")]
enum MediaType {
    All,
    Screen,
    Print,
}

#[derive(Debug, Clone, Copy, PartialEq)]
enum Feature {
    MinWidth(f64),
    MaxWidth(f64),
    MinHeight(f64),
    MaxHeight(f64),
    Portrait(bool),
    ColorScheme(ColorScheme),
    ReducedMotion(bool),
}

impl Feature {
    fn parse(text: &str) -> Result<Self, MediaQueryError> {
        let caps = FEATURE
            .captures(text)
            .ok_or_else(|| MediaQueryError::Malformed(text.to_string()))?;
        let (name, value) = (&caps[1], &caps[2]);

        let invalid = || MediaQueryError::InvalidValue {
            feature: name.to_string(),
            value: value.to_string(),
        };

        match name {
            "min-width" => Ok(Self::MinWidth(parse_length(value).ok_or_else(invalid)?)),
            "max-width" => Ok(Self::MaxWidth(parse_length(value).ok_or_else(invalid)?)),
            "min-height" => Ok(Self::MinHeight(parse_length(value).ok_or_else(invalid)?)),
            "max-height" => Ok(Self::MaxHeight(parse_length(value).ok_or_else(invalid)?)),
            "orientation" => match value {
                "portrait" => Ok(Self::Portrait(true)),
                "landscape" => Ok(Self::Portrait(false)),
                _ => Err(invalid()),
            },
            "prefers-color-scheme" => value.parse().map(Self::ColorScheme).map_err(|_| invalid()),
            "prefers-reduced-motion" => match value {
                "reduce" => Ok(Self::ReducedMotion(true)),
                "no-preference" => Ok(Self::ReducedMotion(false)),
                _ => Err(invalid()),
            },
            other => Err(MediaQueryError::UnknownFeature(other.to_string())),
        }
    }

    fn matches(&self, viewport: &Viewport) -> bool {
        let width = f64::from(viewport.width);
        let height = f64::from(viewport.height);

        match *self {
            Self::MinWidth(px) => width >= px,
            Self::MaxWidth(px) => width <= px,
            Self::MinHeight(px) => height >= px,
            Self::MaxHeight(px) => height <= px,
            Self::Portrait(portrait) => viewport.is_portrait() == portrait,
            Self::ColorScheme(scheme) => viewport.color_scheme == scheme,
            Self::ReducedMotion(reduced) => viewport.reduced_motion == reduced,
        }
    }
}

/// Converts `768px`, `48em`, `48rem` or a bare `0` to pixels.
fn parse_length(value: &str) -> Option<f64> {
    let caps = LENGTH.captures(value)?;
    let amount: f64 = caps[1].parse().ok()?;

    match caps.get(2).map(|unit| unit.as_str()) {
        Some("px") => Some(amount),
        Some(_) => Some(amount * PX_PER_EM),
        None if amount == 0.0 => Some(0.0),
        None => None,
    }
}

#[derive(Debug, Clone, PartialEq)]
struct Clause {
    negated: bool,
    media_type: MediaType,
    features: Vec<Feature>,
}

impl Clause {
    fn parse(raw: &str) -> Result<Self, MediaQueryError> {
        let text = raw.trim();
        if text.is_empty() {
            return Err(MediaQueryError::Malformed(raw.to_string()));
        }

        let mut parts = AND.split(text);
        let head = parts.next().unwrap_or_default().trim();

        let (negated, head) = if let Some(rest) = head.strip_prefix("not ") {
            (true, rest.trim_start())
        } else if let Some(rest) = head.strip_prefix("only ") {
            (false, rest.trim_start())
        } else {
            (false, head)
        };

        let mut media_type = MediaType::All;
        let mut features = Vec::new();

        if head.starts_with('(') {
            features.push(Feature::parse(head)?);
        } else {
            media_type = head
                .parse()
                .map_err(|_| MediaQueryError::UnknownMediaType(head.to_string()))?;
        }

        for part in parts {
            features.push(Feature::parse(part.trim())?);
        }

        Ok(Self {
            negated,
            media_type,
            features,
        })
    }

    fn matches(&self, viewport: &Viewport) -> bool {
        let type_matches = self.media_type != MediaType::Print;
        let matched = type_matches && self.features.iter().all(|f| f.matches(viewport));
        matched != self.negated
    }
}

/// A parsed media query list.
///
/// Comma-separated clauses are alternatives; within a clause, features
/// joined by `and` must all hold. The environment is a screen, so the
/// `print` media type never matches.
#[derive(Debug, Clone, PartialEq)]
pub struct MediaQuery {
    source: String,
    clauses: Vec<Clause>,
}

impl MediaQuery {
    pub fn parse(source: &str) -> Result<Self, MediaQueryError> {
        let normalized = source.trim().to_ascii_lowercase();
        if normalized.is_empty() {
            return Err(MediaQueryError::Empty);
        }

        let clauses = normalized
            .split(',')
            .map(Clause::parse)
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Self {
            source: source.trim().to_string(),
            clauses,
        })
    }

    /// The query text as given, without surrounding whitespace.
    pub fn as_str(&self) -> &str {
        &self.source
    }

    pub fn matches(&self, viewport: &Viewport) -> bool {
        self.clauses.iter().any(|clause| clause.matches(viewport))
    }
}

impl FromStr for MediaQuery {
    type Err = MediaQueryError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl fmt::Display for MediaQuery {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.source)
    }
}
