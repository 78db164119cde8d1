// src/cli/display.rs
use crate::controller::{FlashLevel, FlashMessage, View};
use crate::domain::bookmark::{Bookmark, BookmarkForm};
use crate::domain::repositories::query::Page;
use crate::domain::tag::Tag;
use crate::domain::user::User;
use crate::domain::validation::ValidationErrors;
use crossterm::style::{style, Color, Stylize};
use std::fmt::Display;
use std::io::{self, IsTerminal, Write};

/// Applies colors only when enabled, so piped output stays plain
#[derive(Debug, Clone, Copy)]
pub struct Palette {
    enabled: bool,
}

impl Palette {
    pub fn new(enabled: bool) -> Self {
        Self { enabled }
    }

    /// Colors on when stdout is a terminal and `no_color` is not set
    pub fn detect(no_color: bool) -> Self {
        Self::new(!no_color && io::stdout().is_terminal())
    }

    fn paint<D: Display>(&self, content: D, color: Color) -> String {
        if self.enabled {
            style(content).with(color).to_string()
        } else {
            content.to_string()
        }
    }

    fn title<D: Display>(&self, content: D) -> String {
        self.paint(content, Color::Green)
    }

    fn url<D: Display>(&self, content: D) -> String {
        self.paint(content, Color::Yellow)
    }

    fn tags<D: Display>(&self, content: D) -> String {
        self.paint(content, Color::Blue)
    }

    fn error<D: Display>(&self, content: D) -> String {
        self.paint(content, Color::Red)
    }
}

/// Write a view as text
pub fn render_text<W: Write>(out: &mut W, view: &View, palette: Palette) -> io::Result<()> {
    match view {
        View::Index(page) => write_page(out, page, palette),
        View::Detail { bookmark, owner } => write_detail(out, bookmark, owner, palette),
        View::Form {
            form,
            available_tags,
            errors,
        } => write_form(out, form, available_tags, errors, palette),
        View::Tagged { bookmarks, tags } => {
            if tags.is_empty() {
                writeln!(out, "Bookmarks without tags")?;
            } else {
                writeln!(out, "Bookmarks tagged {}", tags.join(" or "))?;
            }
            write_bookmarks(out, bookmarks, palette)
        }
    }
}

/// Write a view as pretty JSON
pub fn render_json<W: Write>(out: &mut W, view: &View) -> io::Result<()> {
    serde_json::to_writer_pretty(&mut *out, view)?;
    writeln!(out)
}

pub fn write_flash<W: Write>(out: &mut W, messages: &[FlashMessage], palette: Palette) -> io::Result<()> {
    for message in messages {
        match message.level {
            FlashLevel::Success => writeln!(out, "{}", palette.paint(&message.text, Color::Green))?,
            FlashLevel::Error => writeln!(out, "{}", palette.error(&message.text))?,
        }
    }
    Ok(())
}

fn write_bookmarks<W: Write>(out: &mut W, bookmarks: &[Bookmark], palette: Palette) -> io::Result<()> {
    if bookmarks.is_empty() {
        return writeln!(out, "No bookmarks to display");
    }

    let id_width = bookmarks
        .iter()
        .filter_map(|b| b.id)
        .map(|id| id.to_string().len())
        .max()
        .unwrap_or(1);

    for bookmark in bookmarks {
        let id = bookmark.id.map_or_else(String::new, |id| id.to_string());
        writeln!(out, "{:>id_width$}. {}", id, palette.title(&bookmark.title))?;
        if !bookmark.url.is_empty() {
            writeln!(out, "{:id_width$}  {}", "", palette.url(&bookmark.url))?;
        }
        if !bookmark.description.is_empty() {
            writeln!(out, "{:id_width$}  {}", "", bookmark.description)?;
        }
        if !bookmark.tags.is_empty() {
            writeln!(out, "{:id_width$}  {}", "", palette.tags(bookmark.tag_string()))?;
        }
    }
    Ok(())
}

fn write_page<W: Write>(out: &mut W, page: &Page<Bookmark>, palette: Palette) -> io::Result<()> {
    write_bookmarks(out, &page.items, palette)?;
    write!(
        out,
        "Page {} of {}, {} bookmark(s) total",
        page.page,
        page.page_count(),
        page.total
    )?;
    if page.has_prev() {
        write!(out, ", previous: --page {}", page.page - 1)?;
    }
    if page.has_next() {
        write!(out, ", next: --page {}", page.page + 1)?;
    }
    writeln!(out)
}

fn write_detail<W: Write>(
    out: &mut W,
    bookmark: &Bookmark,
    owner: &User,
    palette: Palette,
) -> io::Result<()> {
    let id = bookmark.id.map_or_else(String::new, |id| id.to_string());
    writeln!(out, "{:<12}{}", "Id:", id)?;
    writeln!(out, "{:<12}{}", "Title:", palette.title(&bookmark.title))?;
    writeln!(out, "{:<12}{}", "URL:", palette.url(&bookmark.url))?;
    writeln!(out, "{:<12}{}", "Description:", bookmark.description)?;
    writeln!(out, "{:<12}{}", "Tags:", palette.tags(bookmark.tag_string()))?;
    writeln!(out, "{:<12}{}", "Owner:", owner.email)?;
    writeln!(out, "{:<12}{}", "Created:", bookmark.created_at.format("%Y-%m-%d %H:%M:%S"))?;
    writeln!(out, "{:<12}{}", "Modified:", bookmark.modified_at.format("%Y-%m-%d %H:%M:%S"))
}

fn write_form<W: Write>(
    out: &mut W,
    form: &BookmarkForm,
    available_tags: &[Tag],
    errors: &ValidationErrors,
    palette: Palette,
) -> io::Result<()> {
    let fields = [
        ("title", &form.title),
        ("description", &form.description),
        ("url", &form.url),
        ("tag_string", &form.tag_string),
    ];
    for (name, value) in fields {
        writeln!(out, "{:<12}{}", format!("{}:", name), value.as_deref().unwrap_or(""))?;
        for message in errors.messages(name) {
            writeln!(out, "{:<12}{}", "", palette.error(message))?;
        }
    }
    for (field, messages) in errors.iter() {
        if !fields.iter().any(|(name, _)| *name == field) {
            writeln!(out, "{}: {}", field, palette.error(messages.join(", ")))?;
        }
    }
    if !available_tags.is_empty() {
        writeln!(out, "{:<12}{}", "known tags:", palette.tags(Tag::format_tags(available_tags)))?;
    }
    Ok(())
}
