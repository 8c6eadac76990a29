//! Movie detail panel
//!
//! A detail view starts collapsed (short synopsis as plain text) and can be
//! toggled to expanded (full synopsis, emitted as markup).

use crate::model::{MovieId, MovieItem};

/// Synopsis to show for the current toggle state
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Synopsis<'a> {
    /// Plain text, must be escaped when rendered
    Short(&'a str),
    /// Rich markup, rendered verbatim
    Full(&'a str),
}

#[derive(Debug, Clone)]
pub struct DetailView<'a> {
    id: MovieId,
    movie: &'a MovieItem,
    expanded: bool,
}

impl<'a> DetailView<'a> {
    pub fn new(id: MovieId, movie: &'a MovieItem) -> Self {
        Self {
            id,
            movie,
            expanded: false,
        }
    }

    pub fn with_expanded(mut self, expanded: bool) -> Self {
        self.expanded = expanded;
        self
    }

    pub fn toggle(&mut self) {
        self.expanded = !self.expanded;
    }

    pub fn is_expanded(&self) -> bool {
        self.expanded
    }

    pub fn movie(&self) -> &'a MovieItem {
        self.movie
    }

    pub fn synopsis(&self) -> Synopsis<'a> {
        if self.expanded {
            Synopsis::Full(&self.movie.synopsis)
        } else {
            Synopsis::Short(&self.movie.synopsis_short)
        }
    }

    /// Panel fragment for the viewer page's dialog
    pub fn render_html(&self) -> String {
        let synopsis = match self.synopsis() {
            Synopsis::Short(text) => {
                format!("<p class=\"synopsis synopsis-short\">{}</p>", escape_html(text))
            }
            Synopsis::Full(markup) => format!("<div class=\"synopsis synopsis-full\">{}</div>", markup),
        };
        let toggle_label = if self.expanded {
            "Show short synopsis"
        } else {
            "Show full synopsis"
        };

        format!(
            r#"<div class="movie-detail" data-movie-id="{id}">
    <div class="movie-poster"><img src="{image}" alt="Movie poster"></div>
    <div class="movie-info">
        <h2>{name}</h2>
        <p class="released">Released: {year}</p>
        <div class="synopsis-header">
            <span>Synopsis:</span>
            <a class="synopsis-toggle" role="switch" aria-checked="{expanded}" href="/movies/{id}?expanded={next}" data-detail-toggle>{toggle_label}</a>
        </div>
        {synopsis}
    </div>
</div>"#,
            id = self.id,
            image = escape_html(&self.movie.image),
            name = escape_html(&self.movie.name),
            year = self.movie.production_year,
            expanded = self.expanded,
            next = !self.expanded,
            toggle_label = toggle_label,
            synopsis = synopsis,
        )
    }
}

/// Escape text for inclusion in HTML element content or attribute values
pub fn escape_html(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            _ => escaped.push(c),
        }
    }
    escaped
}
