mod webdav;

pub use webdav::WebDavClipboardClient;
