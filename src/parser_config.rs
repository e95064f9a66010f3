use crate::constants::DEFAULT_LINK_DOMAINS;

/// Configuration options for slide normalization.
///
/// Use [`ParserConfig::builder()`] to create a configuration instance.
/// This allows you to customize only the desired fields while falling back to sensible defaults for the rest.
///
/// # Configuration Options
///
/// | Parameter | Type | Default | Description |
/// |-----------|------|---------|-------------|
/// | `extract_images` | `bool` | `true` | Whether images are collected at all |
/// | `inherit_images` | `bool` | `true` | Whether master and layout images are merged into every slide |
/// | `link_domains` | `Vec<String>` | `["youtube.com", "youtu.be"]` | Hyperlinks kept when containing one |
/// | `suppress_title_duplicates` | `bool` | `true` | Whether body paragraphs equal to the slide title are dropped |
///
/// # Example
///
/// ```
/// use pptx_digest::ParserConfig;
///
/// let config = ParserConfig::builder()
///     .extract_images(true)
///     .link_domains(["vimeo.com"])
///     .build();
/// assert_eq!(config.link_domains, vec!["vimeo.com".to_string()]);
/// ```
#[derive(Debug, Clone)]
pub struct ParserConfig {
    pub extract_images: bool,
    pub inherit_images: bool,
    pub link_domains: Vec<String>,
    pub suppress_title_duplicates: bool,
}

impl Default for ParserConfig {
    fn default() -> Self {
        Self {
            extract_images: true,
            inherit_images: true,
            link_domains: default_link_domains(),
            suppress_title_duplicates: true,
        }
    }
}

impl ParserConfig {
    pub fn builder() -> ParserConfigBuilder {
        ParserConfigBuilder::default()
    }

    /// Whether a hyperlink address contains one of the configured domains.
    pub fn is_link_of_interest(&self, address: &str) -> bool {
        self.link_domains.iter().any(|domain| address.contains(domain.as_str()))
    }
}

fn default_link_domains() -> Vec<String> {
    DEFAULT_LINK_DOMAINS.iter().map(|domain| domain.to_string()).collect()
}

/// Builder for [`ParserConfig`].
///
/// Allows setting individual configuration fields while falling back to defaults for any unspecified values
#[derive(Debug, Default)]
pub struct ParserConfigBuilder {
    extract_images: Option<bool>,
    inherit_images: Option<bool>,
    link_domains: Option<Vec<String>>,
    suppress_title_duplicates: Option<bool>,
}

impl ParserConfigBuilder {
    /// Sets whether images should be collected from the slides.
    pub fn extract_images(mut self, value: bool) -> Self {
        self.extract_images = Some(value);
        self
    }

    /// Sets whether master and layout images are inherited by each slide.
    pub fn inherit_images(mut self, value: bool) -> Self {
        self.inherit_images = Some(value);
        self
    }

    /// Replaces the hyperlink domain allowlist.
    pub fn link_domains<I, S>(mut self, domains: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.link_domains = Some(domains.into_iter().map(Into::into).collect());
        self
    }

    pub fn suppress_title_duplicates(mut self, value: bool) -> Self {
        self.suppress_title_duplicates = Some(value);
        self
    }

    /// Builds the final [`ParserConfig`] instance, applying default values for any fields that were not set.
    pub fn build(self) -> ParserConfig {
        ParserConfig {
            extract_images: self.extract_images.unwrap_or(true),
            inherit_images: self.inherit_images.unwrap_or(true),
            link_domains: self.link_domains.unwrap_or_else(default_link_domains),
            suppress_title_duplicates: self.suppress_title_duplicates.unwrap_or(true),
        }
    }
}
