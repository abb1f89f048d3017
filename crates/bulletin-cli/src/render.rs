//! Plain-text output for board resources.

use bulletin_core::models::{
    Comment, Post, ReactionState, ScrapStatus, Tag, TagSuggestion, User,
};
use bulletin_core::utils::{format_date, preview, truncate_string};
use bulletin_core::SessionData;

const TITLE_WIDTH: usize = 48;
const PREVIEW_WIDTH: usize = 72;

fn date_or_blank(date: Option<&str>) -> String {
    date.map(format_date).unwrap_or_default()
}

/// One line per post: id, title, author, date and counters.
pub fn post_line(post: &Post) -> String {
    format!(
        "{:>6}  {:<width$}  {:<16}  {:>10}  +{} -{} c{}",
        post.id,
        truncate_string(&post.title, TITLE_WIDTH),
        truncate_string(post.author_name(), 16),
        date_or_blank(post.created_at.as_deref()),
        post.like_count,
        post.dislike_count,
        post.comment_count,
        width = TITLE_WIDTH,
    )
}

pub fn print_posts(posts: &[Post]) {
    if posts.is_empty() {
        println!("No posts.");
        return;
    }
    for post in posts {
        println!("{}", post_line(post));
    }
}

pub fn print_post(post: &Post, comments: &[Comment]) {
    println!("{}", post.title);
    let mut meta = vec![post.author_name().to_string()];
    if let Some(date) = post.created_at.as_deref() {
        meta.push(format_date(date));
    }
    if let Some(category) = post.category() {
        meta.push(category.label().to_string());
    }
    println!("{}", meta.join(" · "));
    if !post.tags.is_empty() {
        let tags: Vec<String> = post.tags.iter().map(|t| format!("#{}", t)).collect();
        println!("{}", tags.join(" "));
    }
    println!();
    println!("{}", post.content);
    println!();
    println!(
        "+{} likes  -{} dislikes  {} scraps",
        post.like_count, post.dislike_count, post.scrap_count
    );
    println!();
    println!("Comments ({})", comments.len());
    for comment in comments {
        println!("{}", comment_line(comment));
    }
}

pub fn comment_line(comment: &Comment) -> String {
    format!(
        "  [{}] {} ({}): {}",
        comment.id,
        comment.author_name(),
        date_or_blank(comment.created_at.as_deref()),
        preview(comment.display_body(), PREVIEW_WIDTH),
    )
}

pub fn print_comments(comments: &[Comment]) {
    if comments.is_empty() {
        println!("No comments.");
        return;
    }
    for comment in comments {
        println!("{}", comment_line(comment));
    }
}

pub fn print_comment(comment: &Comment) {
    println!("{} · {}", comment.author_name(), date_or_blank(comment.created_at.as_deref()));
    println!("{}", comment.display_body());
    println!("+{} -{}", comment.like_count, comment.dislike_count);
}

pub fn print_user(user: &User) {
    println!("{}  {}", user.initial(), user.display_name);
    println!("  id:     {}", user.id);
    if let Some(email) = &user.email {
        println!("  email:  {}", email);
    }
    if let Some(status) = user.status {
        println!("  status: {}", status.display_name());
    }
    if let Some(avatar) = &user.avatar_url {
        println!("  avatar: {}", avatar);
    }
}

pub fn print_session(session: Option<&SessionData>) {
    match session {
        Some(data) => {
            let since = data.created_at.with_timezone(&chrono::Local);
            println!(
                "Signed in as {} ({}) since {}",
                data.user.display_name,
                data.user.id,
                since.format("%Y.%m.%d %H:%M")
            );
        }
        None => println!("Not signed in. Run `bulletin login`."),
    }
}

pub fn print_tags(tags: &[Tag]) {
    if tags.is_empty() {
        println!("No tags.");
        return;
    }
    for tag in tags {
        println!("{:>6}  #{}", tag.id, tag.name);
    }
}

pub fn print_suggestions(suggestions: &[TagSuggestion]) {
    for s in suggestions {
        match s.usage_count {
            Some(count) => println!("#{} ({})", s.name, count),
            None => println!("#{}", s.name),
        }
    }
}

pub fn print_reaction(state: Option<&ReactionState>) {
    match state {
        Some(state) => println!("{}", state.summary()),
        None => println!("updated"),
    }
}

pub fn print_scrap_status(status: &ScrapStatus) {
    println!("{}", if status.scrapped { "scrapped" } else { "not scrapped" });
}
