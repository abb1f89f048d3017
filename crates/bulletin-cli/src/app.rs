use std::sync::Arc;

use anyhow::{Context, Result};
use serde::Serialize;
use tracing::debug;

use bulletin_core::auth::{self, oauth};
use bulletin_core::models::{Category, NewPost, PostUpdate, ProfileUpdate};
use bulletin_core::{ApiClient, Config, Navigator, Route, SessionStore};

use crate::cli::{CommentsCommand, Command, MeCommand, PostForm, PostsCommand, TagsCommand};
use crate::render;

/// Navigator for a terminal session. There is no page to redirect to, so
/// a request for the login route becomes a hint on stderr.
pub struct TerminalNavigator;

impl Navigator for TerminalNavigator {
    fn navigate(&self, route: &Route) {
        match route {
            Route::Login => {
                eprintln!("Your session has ended. Run `bulletin login` to sign in again.")
            }
            other => debug!(route = %other, "Ignoring navigation"),
        }
    }
}

pub struct App {
    config: Config,
    session: Arc<SessionStore>,
    api: ApiClient,
    json: bool,
}

impl App {
    pub fn new(mut config: Config, api_url: Option<String>, json: bool) -> Result<Self> {
        if let Some(url) = api_url {
            config.api_base_url = Some(url);
        }
        let session = auth::open_session(&config)?;
        let api = ApiClient::new(&config.api_config(), session.clone(), Arc::new(TerminalNavigator))
            .context("Failed to create API client")?;
        debug!(base_url = api.base_url(), "Client ready");
        Ok(Self {
            config,
            session,
            api,
            json,
        })
    }

    /// Print `value` as JSON when requested, otherwise with `human`.
    fn emit<T: Serialize + ?Sized>(&self, value: &T, human: impl FnOnce(&T)) -> Result<()> {
        if self.json {
            println!("{}", serde_json::to_string_pretty(value)?);
        } else {
            human(value);
        }
        Ok(())
    }

    pub async fn run(&self, command: Command) -> Result<()> {
        match command {
            Command::Login { code, callback_url } => self.login(code.or(callback_url)).await,
            Command::Logout => {
                oauth::logout(&self.session);
                println!("Signed out.");
                Ok(())
            }
            Command::Status => {
                let snapshot = self.session.snapshot();
                if self.json {
                    let user = snapshot.as_ref().map(|s| &s.user);
                    println!("{}", serde_json::to_string_pretty(&serde_json::json!({
                        "authenticated": snapshot.is_some(),
                        "user": user,
                        "api_base_url": self.config.api_base_url(),
                    }))?);
                } else {
                    render::print_session(snapshot.as_ref());
                    println!("Backend: {}", self.api.base_url());
                }
                Ok(())
            }
            Command::Me(cmd) => self.me(cmd).await,
            Command::Posts(cmd) => self.posts(cmd).await,
            Command::Scraps => {
                let posts = self.api.my_scraps().await?;
                self.emit(&posts, |p| render::print_posts(p))
            }
            Command::Tags(cmd) => self.tags(cmd).await,
            Command::Comments(cmd) => self.comments(cmd).await,
        }
    }

    async fn login(&self, input: Option<String>) -> Result<()> {
        let input = match input {
            Some(input) => input,
            None => {
                println!("Open this URL in your browser and sign in:");
                println!();
                println!("  {}", self.api.login_url());
                println!();
                rpassword::prompt_password("Paste the callback URL or code: ")
                    .context("Failed to read authorization code")?
            }
        };
        let user = oauth::complete_login(&self.api, &self.session, &input).await?;
        println!("Signed in as {}.", user.display_name);
        Ok(())
    }

    async fn me(&self, cmd: MeCommand) -> Result<()> {
        let user = match cmd {
            MeCommand::Show => self.api.my_profile().await?,
            MeCommand::Update {
                display_name,
                avatar_url,
            } => {
                let update = ProfileUpdate {
                    display_name,
                    avatar_url,
                };
                let user = self.api.update_my_profile(&update).await?;
                // Keep the cached identity in step with the profile
                if let Some(token) = self.session.token() {
                    self.session.set_auth(token, user.clone());
                }
                user
            }
        };
        self.emit(&user, render::print_user)
    }

    async fn posts(&self, cmd: PostsCommand) -> Result<()> {
        match cmd {
            PostsCommand::List { category } => {
                let filter = category.as_deref().map(parse_category).transpose()?;
                let mut posts = self.api.list_posts().await?;
                if let Some(category) = filter.filter(|c| *c != Category::All) {
                    posts.retain(|p| p.category() == Some(category));
                }
                self.emit(&posts, |p| render::print_posts(p))
            }
            PostsCommand::Show { id } => {
                let (post, comments) =
                    futures::try_join!(self.api.get_post(&id), self.api.post_comments(&id))?;
                if self.json {
                    println!("{}", serde_json::to_string_pretty(&serde_json::json!({
                        "post": post,
                        "comments": comments,
                    }))?);
                } else {
                    render::print_post(&post, &comments);
                }
                Ok(())
            }
            PostsCommand::Create(form) => {
                let post = self.api.create_post(&new_post(form)?).await?;
                println!("Created post {}.", post.id);
                Ok(())
            }
            PostsCommand::Edit {
                id,
                title,
                content,
                tags,
            } => {
                let mut update = PostUpdate {
                    title,
                    content,
                    tags: None,
                };
                if let Some(tags) = tags {
                    update = update.with_tags(tags);
                }
                let post = self.api.update_post(&id, &update).await?;
                self.emit(&post, |p| println!("{}", render::post_line(p)))
            }
            PostsCommand::Delete { id } => {
                self.api.delete_post(&id).await?;
                println!("Deleted post {}.", id);
                Ok(())
            }
            PostsCommand::Search { query } => {
                let posts = self.api.search_posts(&query).await?;
                self.emit(&posts, |p| render::print_posts(p))
            }
            PostsCommand::Tagged { tags } => {
                let posts = self.api.posts_by_tags(&tags).await?;
                self.emit(&posts, |p| render::print_posts(p))
            }
            PostsCommand::Like { id } => {
                let state = self.api.like_post(&id).await?;
                self.emit(&state, |s| render::print_reaction(s.as_ref()))
            }
            PostsCommand::Dislike { id } => {
                let state = self.api.dislike_post(&id).await?;
                self.emit(&state, |s| render::print_reaction(s.as_ref()))
            }
            PostsCommand::Scrap { id } => {
                let state = self.api.scrap_post(&id).await?;
                self.emit(&state, |s| render::print_reaction(s.as_ref()))
            }
            PostsCommand::ScrapStatus { id } => {
                let status = self.api.scrap_status(&id).await?;
                self.emit(&status, render::print_scrap_status)
            }
        }
    }

    async fn tags(&self, cmd: TagsCommand) -> Result<()> {
        match cmd {
            TagsCommand::List { post_id } => {
                let tags = self.api.post_tags(&post_id).await?;
                self.emit(&tags, |t| render::print_tags(t))
            }
            TagsCommand::Add { post_id, tags } => {
                self.api.add_post_tags(&post_id, &tags).await?;
                println!("Tags added.");
                Ok(())
            }
            TagsCommand::AddOne { post_id, name } => {
                self.api.add_post_tag(&post_id, &name).await?;
                println!("Tag added.");
                Ok(())
            }
            TagsCommand::Remove { post_id, tag_id } => {
                self.api.remove_post_tag(&post_id, &tag_id).await?;
                println!("Tag removed.");
                Ok(())
            }
            TagsCommand::Replace { post_id, tags } => {
                self.api.replace_post_tags(&post_id, &tags).await?;
                println!("Tags replaced.");
                Ok(())
            }
            TagsCommand::Suggest { keyword, limit } => {
                let suggestions = self.api.autocomplete_tags(&keyword, limit).await?;
                self.emit(&suggestions, |s| render::print_suggestions(s))
            }
        }
    }

    async fn comments(&self, cmd: CommentsCommand) -> Result<()> {
        match cmd {
            CommentsCommand::List { post_id } => {
                let comments = self.api.post_comments(&post_id).await?;
                self.emit(&comments, |c| render::print_comments(c))
            }
            CommentsCommand::Show { id } => {
                let comment = self.api.get_comment(&id).await?;
                self.emit(&comment, render::print_comment)
            }
            CommentsCommand::Add { post_id, body } => {
                let comment = self.api.create_comment(&post_id, &body).await?;
                println!("Added comment {}.", comment.id);
                Ok(())
            }
            CommentsCommand::Edit { id, body } => {
                let comment = self.api.update_comment(&id, &body).await?;
                self.emit(&comment, render::print_comment)
            }
            CommentsCommand::Delete { id, hard } => {
                self.api.delete_comment(&id, hard).await?;
                println!("Deleted comment {}.", id);
                Ok(())
            }
            CommentsCommand::Like { id } => {
                let state = self.api.like_comment(&id).await?;
                self.emit(&state, |s| render::print_reaction(s.as_ref()))
            }
            CommentsCommand::Dislike { id } => {
                let state = self.api.dislike_comment(&id).await?;
                self.emit(&state, |s| render::print_reaction(s.as_ref()))
            }
        }
    }
}

fn parse_category(slug: &str) -> Result<Category> {
    Category::from_slug(slug).with_context(|| {
        let known: Vec<&str> = Category::ALL
            .iter()
            .map(|c| c.slug())
            .filter(|s| !s.is_empty())
            .collect();
        format!("Unknown category '{}'. Expected one of: {}", slug, known.join(", "))
    })
}

fn new_post(form: PostForm) -> Result<NewPost> {
    let mut post = NewPost::new(form.title, form.content).with_tags(form.tags);
    if let Some(category) = form.category.as_deref() {
        post = post.with_category(parse_category(category)?);
    }
    Ok(post)
}
