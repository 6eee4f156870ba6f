pub mod status {

    pub const NEEDS_UPDATE: &str = "needs_update";

    pub const DONE: &str = "done";
}

pub mod library {

    pub const DEFAULT_SHOW_TYPE: &str = "show";

    pub const DEFAULT_PROVIDER: &str = "thetvdb";

    pub const POSTER_CATEGORY: &str = "poster";

    /// File category used when registering downloaded artwork.
    pub const IMAGE_CATEGORY: &str = "image";
}

pub mod info {

    /// Keys the info source adds for its own bookkeeping; never persisted.
    pub const TRANSIENT_KEYS: &[&str] = &["in_wanted", "in_library"];
}

pub mod titles {

    pub const ARTICLES: &[&str] = &["the", "a", "an"];
}
