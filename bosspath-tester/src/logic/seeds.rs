use anyhow::{Result, bail};
use bosspath_game::{generate_entropy_seed, normalize_seed};

const DEFAULT_SEED: &str = "TEST12";

/// Where a resolved seed came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SeedOrigin {
    Explicit,
    Generated,
}

/// Detailed seed metadata used for logic analysis.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SeedInfo {
    pub seed: String,
    pub raw: Option<String>,
    pub origin: SeedOrigin,
}

impl SeedInfo {
    #[must_use]
    pub fn explicit(seed: String, raw: &str) -> Self {
        Self {
            seed,
            raw: Some(raw.to_string()),
            origin: SeedOrigin::Explicit,
        }
    }

    #[must_use]
    pub fn generated() -> Self {
        Self {
            seed: generate_entropy_seed(),
            raw: None,
            origin: SeedOrigin::Generated,
        }
    }

    /// Whether normalization altered the token the user typed.
    #[must_use]
    pub fn was_normalized(&self) -> bool {
        self.raw.as_deref().is_some_and(|raw| raw != self.seed)
    }
}

fn is_seed_token_valid(token: &str) -> bool {
    regex::Regex::new(r"^[A-Za-z0-9]+$")
        .map(|re| re.is_match(token))
        .unwrap_or(false)
}

/// Resolve a list of CLI seed arguments into canonical seeds.
///
/// Supports alphanumeric seeds (normalized like the engine does) and the
/// keyword `random`, which draws a fresh seed.
pub fn resolve_seed_inputs(tokens: &[String]) -> Result<Vec<SeedInfo>> {
    let mut resolved: Vec<SeedInfo> = Vec::new();

    for token in tokens {
        if token.is_empty() {
            continue;
        }

        let info = if token.eq_ignore_ascii_case("random") {
            SeedInfo::generated()
        } else if let Some(seed) = normalize_seed(token).filter(|_| is_seed_token_valid(token)) {
            SeedInfo::explicit(seed, token)
        } else {
            bail!("Unrecognized seed token: {token}");
        };

        if info.was_normalized() {
            log::info!("seed token {token} normalized to {}", info.seed);
        }
        if !resolved.iter().any(|existing| existing.seed == info.seed) {
            resolved.push(info);
        }
    }

    if resolved.is_empty() {
        resolved.push(SeedInfo::explicit(DEFAULT_SEED.to_string(), DEFAULT_SEED));
    }

    Ok(resolved)
}
