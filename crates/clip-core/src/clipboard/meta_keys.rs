/// Keys of the snapshot property list written by the clipboard logger.
pub mod snapshot {
    pub const ITEMS: &str = "items";
    pub const PLAIN_TEXT: &str = "public.utf8-plain-text";
    pub const FILE_EXTENSION: &str = "plist";
}

/// Keys of the JSON document exchanged with the remote endpoint.
pub mod remote {
    pub const CLIPBOARD: &str = "Clipboard";
    pub const TYPE: &str = "Type";
    pub const DEVICE: &str = "Device";
    pub const RANDOM_NUMBER: &str = "Random_number";
    pub const TYPE_TEXT: &str = "Text";
}

/// Pasteboard type that marks content written by this app.
pub const OWN_CLIPPING_FORMAT: &str = "com.clip-sync.clipping";
