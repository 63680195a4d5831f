//! Display fragments sent to the chat page
//!
//! Every fragment travels as one WebSocket text message: an htmx out-of-band
//! swap that appends a `<span>` to the `#notifications` element.

const ENVELOPE_OPEN: &str = r#"<div id="notifications" hx-swap-oob="beforeend"><span>"#;
const ENVELOPE_CLOSE: &str = "</span></div>";

/// One atomic piece of a turn's output
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Fragment {
    /// Starts a turn
    Open,
    /// The user's own message, echoed back
    Echo(String),
    /// Marks the start of the model's reply
    Assistant,
    /// A single token from the model
    Token(String),
    /// Ends a turn that completed normally
    Close,
}

impl Fragment {
    /// Bare text of the fragment, without markup
    pub fn content(&self) -> String {
        match self {
            Fragment::Open | Fragment::Close => String::new(),
            Fragment::Echo(text) => format!("You: {}", text),
            Fragment::Assistant => "AI: ".to_string(),
            Fragment::Token(token) => token.clone(),
        }
    }

    /// Markup carried inside the envelope. User and model text is escaped.
    fn markup(&self) -> String {
        match self {
            Fragment::Open => String::new(),
            Fragment::Echo(text) => format!("<b>You: </b>{}<br/><br/>", escape_html(text)),
            Fragment::Assistant => "<b>AI: </b>".to_string(),
            Fragment::Token(token) => escape_html(token),
            Fragment::Close => "<br/><br/>".to_string(),
        }
    }

    /// The transport-ready message for this fragment
    pub fn render(&self) -> String {
        let markup = self.markup();
        let mut out = String::with_capacity(ENVELOPE_OPEN.len() + markup.len() + ENVELOPE_CLOSE.len());
        out.push_str(ENVELOPE_OPEN);
        out.push_str(&markup);
        out.push_str(ENVELOPE_CLOSE);
        out
    }

    pub fn is_marker(&self) -> bool {
        !matches!(self, Fragment::Token(_))
    }
}

pub fn escape_html(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}
