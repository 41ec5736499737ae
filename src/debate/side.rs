/// Which debater an utterance belongs to, or whose turn it is to move.
///
/// Pro always opens, so in a strictly alternating transcript the
/// speaker of any utterance is recoverable from its index parity.
#[derive(Debug, Clone, Copy, Eq, Hash, PartialEq, PartialOrd, Ord)]
pub enum Side {
    Pro,
    Con,
}

impl Side {
    /// the opponent
    pub fn flip(&self) -> Self {
        match self {
            Self::Pro => Self::Con,
            Self::Con => Self::Pro,
        }
    }
    /// speaker of the utterance at this transcript index
    pub fn at(index: usize) -> Self {
        if index % 2 == 0 { Self::Pro } else { Self::Con }
    }
    /// speaker prefix used in transcripts
    pub fn tag(&self) -> &'static str {
        match self {
            Self::Pro => "A",
            Self::Con => "B",
        }
    }
    /// stance wording used in prompts
    pub fn stance(&self) -> &'static str {
        match self {
            Self::Pro => "FOR",
            Self::Con => "AGAINST",
        }
    }
}

impl std::fmt::Display for Side {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Pro => write!(f, "pro"),
            Self::Con => write!(f, "con"),
        }
    }
}

impl std::str::FromStr for Side {
    type Err = anyhow::Error;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "pro" | "a" => Ok(Self::Pro),
            "con" | "b" => Ok(Self::Con),
            other => Err(anyhow::anyhow!("invalid side: {}", other)),
        }
    }
}

impl serde::Serialize for Side {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.collect_str(self)
    }
}

impl<'de> serde::Deserialize<'de> for Side {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        String::deserialize(deserializer)?
            .parse()
            .map_err(serde::de::Error::custom)
    }
}
