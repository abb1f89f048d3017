use clap::{Args, Parser, Subcommand};

#[derive(Debug, Parser)]
#[command(name = "bulletin")]
#[command(about = "Browse, post, comment and react on the bulletin board")]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Backend base URL (overrides config and BULLETIN_API_URL)
    #[arg(long, global = true)]
    pub api_url: Option<String>,

    /// Print raw JSON instead of formatted text
    #[arg(long, global = true)]
    pub json: bool,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Sign in with Google
    Login {
        /// Authorization code returned by the provider
        #[arg(long, conflicts_with = "callback_url")]
        code: Option<String>,

        /// Full callback URL the browser was redirected to
        #[arg(long)]
        callback_url: Option<String>,
    },

    /// Sign out and forget the stored session
    Logout,

    /// Show who is signed in
    Status,

    /// Your profile
    #[command(subcommand)]
    Me(MeCommand),

    /// Board posts
    #[command(subcommand)]
    Posts(PostsCommand),

    /// Posts you have scrapped
    Scraps,

    /// Tags on a post
    #[command(subcommand)]
    Tags(TagsCommand),

    /// Comments on a post
    #[command(subcommand)]
    Comments(CommentsCommand),
}

#[derive(Debug, Subcommand)]
pub enum MeCommand {
    /// Fetch your profile
    Show,
    /// Change your display name or avatar
    Update {
        #[arg(long)]
        display_name: Option<String>,
        #[arg(long)]
        avatar_url: Option<String>,
    },
}

#[derive(Debug, Subcommand)]
pub enum PostsCommand {
    /// List recent posts
    List {
        /// Only show posts in this category (e.g. programming, design)
        #[arg(short, long)]
        category: Option<String>,
    },
    /// Show a post with its comments
    Show { id: String },
    /// Write a new post
    Create(PostForm),
    /// Edit one of your posts
    Edit {
        id: String,
        #[arg(long)]
        title: Option<String>,
        #[arg(long)]
        content: Option<String>,
        /// Replace the post's tags (comma separated)
        #[arg(long, value_delimiter = ',')]
        tags: Option<Vec<String>>,
    },
    /// Delete one of your posts
    Delete { id: String },
    /// Full-text search
    Search { query: String },
    /// Posts carrying all of the given tags
    Tagged {
        #[arg(required = true)]
        tags: Vec<String>,
    },
    Like { id: String },
    Dislike { id: String },
    /// Toggle the scrap (bookmark) on a post
    Scrap { id: String },
    /// Whether you have scrapped a post
    ScrapStatus { id: String },
}

#[derive(Debug, Args)]
pub struct PostForm {
    #[arg(long)]
    pub title: String,
    #[arg(long)]
    pub content: String,
    #[arg(short, long)]
    pub category: Option<String>,
    /// Comma separated tags
    #[arg(long, value_delimiter = ',')]
    pub tags: Vec<String>,
}

#[derive(Debug, Subcommand)]
pub enum TagsCommand {
    /// List a post's tags
    List { post_id: String },
    /// Add several tags to a post
    Add {
        post_id: String,
        #[arg(required = true)]
        tags: Vec<String>,
    },
    /// Add a single tag to a post
    AddOne { post_id: String, name: String },
    /// Remove a tag from a post by tag id
    Remove { post_id: String, tag_id: String },
    /// Replace all of a post's tags
    Replace { post_id: String, tags: Vec<String> },
    /// Suggest existing tags for a keyword
    Suggest {
        keyword: String,
        #[arg(short, long)]
        limit: Option<u32>,
    },
}

#[derive(Debug, Subcommand)]
pub enum CommentsCommand {
    /// List comments on a post
    List { post_id: String },
    Show { id: String },
    /// Comment on a post
    Add { post_id: String, body: String },
    Edit { id: String, body: String },
    Delete {
        id: String,
        /// Remove permanently instead of hiding the body
        #[arg(long)]
        hard: bool,
    },
    Like { id: String },
    Dislike { id: String },
}
