// src/cli/args.rs
use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

use crate::domain::bookmark::BookmarkForm;

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
/// Personal bookmarks with shared tags
pub struct Cli {
    /// Sets a custom config file
    #[arg(short, long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Turn debugging information on
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub debug: u8,

    /// Act on behalf of this user ID
    #[arg(short, long, value_name = "ID", env = "TAGMARKS_USER")]
    pub user: Option<i32>,

    /// Print views as JSON instead of text
    #[arg(long)]
    pub json: bool,

    /// Disable colored output
    #[arg(long = "no-color")]
    pub no_color: bool,

    #[arg(long = "generate-config", help = "print a default configuration file")]
    pub generate_config: bool,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Initialize a new bookmark database
    CreateDb {
        /// Path where the database will be created
        path: String,
    },
    /// Register a user that can own bookmarks
    CreateUser {
        /// Unique e-mail address of the user
        email: String,
    },
    /// List your bookmarks, one page at a time
    List {
        #[arg(short, long, default_value_t = 1, help = "page number, starting at 1")]
        page: usize,
    },
    /// Show one bookmark with its tags and owner
    Show {
        /// Bookmark ID
        id: String,
    },
    /// Add a bookmark
    Add {
        #[command(flatten)]
        fields: BookmarkFields,
    },
    /// Edit a bookmark; without field options the current values are shown
    Edit {
        /// Bookmark ID
        id: String,

        #[command(flatten)]
        fields: BookmarkFields,
    },
    /// Delete a bookmark
    Delete {
        /// Bookmark ID
        id: String,
    },
    /// Bookmarks carrying any of the given tags; untagged bookmarks when none are given
    Tags {
        /// Exact tag titles
        tags: Vec<String>,
    },
    /// Preview how a comma separated tag string resolves; nothing is stored
    NormalizeTags {
        /// Raw tag string, e.g. "rust, cli,rust"
        tags: String,
    },
}

/// Editable bookmark fields shared by `add` and `edit`
#[derive(Args, Debug, Clone, Default)]
pub struct BookmarkFields {
    #[arg(long)]
    pub url: Option<String>,

    #[arg(long)]
    pub title: Option<String>,

    #[arg(long)]
    pub description: Option<String>,

    #[arg(short = 't', long = "tags", help = "comma separated list of tags")]
    pub tags: Option<String>,
}

impl BookmarkFields {
    pub fn is_empty(&self) -> bool {
        self.url.is_none() && self.title.is_none() && self.description.is_none() && self.tags.is_none()
    }
}

impl From<BookmarkFields> for BookmarkForm {
    fn from(fields: BookmarkFields) -> Self {
        BookmarkForm {
            title: fields.title,
            description: fields.description,
            url: fields.url,
            tag_string: fields.tags,
            user_id: None,
        }
    }
}
