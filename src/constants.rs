/// Constants used by brand-name normalization and query building.
pub mod query {
    /// Punctuation characters mapped to [`NORMALIZATION_REPLACEMENT`] before tokenizing.
    pub const NORMALIZED_PUNCTUATION: [char; 3] = ['\'', ':', '.'];
    /// Replacement character for normalized punctuation.
    pub const NORMALIZATION_REPLACEMENT: char = '-';
    /// Token separator for brand names (single spaces, empty tokens preserved).
    pub const TOKEN_SEPARATOR: char = ' ';
}

/// Constants used by the threshold search state machine.
pub mod search {
    /// Optional threshold used for the first expansion probe.
    pub const INITIAL_OPTIONAL_THRESHOLD: u32 = 1;
}

/// Constants used by the HTTP estimator client.
pub mod estimator {
    /// Default per-probe timeout in seconds; a timeout is a transport failure.
    pub const DEFAULT_TIMEOUT_SECS: u64 = 30;
    /// User agent sent with estimator requests.
    pub const USER_AGENT: &str = "brandprobe/0.1";
}

/// Constants used by evidence and results persistence.
pub mod output {
    /// Default directory for per-brand raw evidence files.
    pub const DEFAULT_EVIDENCE_DIR: &str = "output";
    /// Default path of the final results document.
    pub const DEFAULT_RESULTS_FILE: &str = "queries.json";
    /// Default path of the catalog input document.
    pub const DEFAULT_CATALOG_FILE: &str = "alcohols.json";
    /// Extension used for per-brand evidence files.
    pub const EVIDENCE_EXTENSION: &str = "json";
}

/// Constants used by catalog construction from brand listings.
pub mod ingestion {
    /// Keyword-table key holding category-level general keywords.
    pub const GENERAL_KEYWORDS_KEY: &str = "general";
    /// Type labels grouped under the `distilled` category.
    pub const DISTILLED_TYPES: [&str; 9] = [
        "brandy", "cognac", "gin", "mezcal", "rum", "tequila", "vodka", "whisky", "liqueur",
    ];
    /// Type labels grouped under the `fermented` category.
    pub const FERMENTED_TYPES: [&str; 4] = ["beer", "cider", "sake", "wine"];
    /// Category name for distilled types.
    pub const CATEGORY_DISTILLED: &str = "distilled";
    /// Category name for fermented types.
    pub const CATEGORY_FERMENTED: &str = "fermented";
}
