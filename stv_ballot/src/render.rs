//! Booth markup for a ballot.
//!
//! The fragment uses the ids and classes the booth page styles and submits:
//! `stv_choices_available` / `stv_choices_selected` for the two lists,
//! `gvt` / `gvt-preferences` for group blocks, `preference` for candidates
//! and the hidden `stv_answer` field. Candidate metadata is carried in
//! `data-*` attributes.

use crate::{Ballot, BallotView, Node};

/// Keeps the markup of the last ballot it was synced with.
#[derive(Eq, PartialEq, Debug, Clone, Default)]
pub struct HtmlView {
    pub fragment: String,
    pub answer: String,
}

impl BallotView for HtmlView {
    fn sync(&mut self, ballot: &Ballot) {
        self.fragment = render_fragment(ballot);
        self.answer = ballot.answer().to_string();
    }
}

pub fn render_fragment(ballot: &Ballot) -> String {
    let mut out = String::new();
    out.push_str("<div id=\"stv_choices\">\n");
    render_list(&mut out, ballot, "stv_choices_available", ballot.available());
    render_list(&mut out, ballot, "stv_choices_selected", ballot.chosen());
    out.push_str("</div>\n");
    out.push_str(&format!(
        "<input type=\"hidden\" id=\"stv_answer\" name=\"stv_answer\" value=\"{}\">\n",
        escape_html(ballot.answer())
    ));
    out
}

fn render_list(out: &mut String, ballot: &Ballot, id: &str, nodes: &[Node]) {
    out.push_str(&format!("<ul id=\"{}\" class=\"stv-toplevel\">\n", id));
    for node in nodes {
        match node {
            Node::Candidate(index) => render_candidate(out, ballot, *index),
            Node::Group(group) => {
                let name = escape_html(ballot.group_name(group.id).unwrap_or_default());
                out.push_str(&format!(
                    "<li class=\"gvt\" data-name=\"{}\"><div class=\"gvt-name\">{}</div>\n",
                    name, name
                ));
                out.push_str(&format!(
                    "<ul class=\"gvt-preferences\" data-put=\"{}\">\n",
                    ballot.groups_accept_drops()
                ));
                for index in group.members.iter() {
                    render_candidate(out, ballot, *index);
                }
                out.push_str("</ul></li>\n");
            }
        }
    }
    out.push_str("</ul>\n");
}

fn render_candidate(out: &mut String, ballot: &Ballot, index: usize) {
    let (candidate, label) = match (ballot.candidate(index), ballot.label(index)) {
        (Some(c), Some(l)) => (c, l),
        _ => return,
    };
    let gvt = match &candidate.gvt {
        Some(g) => format!(" data-gvt=\"{}\"", escape_html(g)),
        None => String::new(),
    };
    out.push_str(&format!(
        "<li class=\"preference\" data-index=\"{}\" data-name=\"{}\"{}>{}</li>\n",
        candidate.display_index(),
        escape_html(&candidate.name),
        gvt,
        escape_html(&label)
    ));
}

fn escape_html(s: &str) -> String {
    let mut res = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '&' => res.push_str("&amp;"),
            '<' => res.push_str("&lt;"),
            '>' => res.push_str("&gt;"),
            '"' => res.push_str("&quot;"),
            '\'' => res.push_str("&#39;"),
            _ => res.push(c),
        }
    }
    res
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::builder::Builder;
    use crate::{perform_drag, BoothOptions, ItemRef, ListId, Move};

    fn ballot(descriptors: &[&str]) -> Ballot {
        let d: Vec<String> = descriptors.iter().map(|s| s.to_string()).collect();
        Builder::new(&BoothOptions::DEFAULT_OPTIONS)
            .unwrap()
            .descriptors(&d)
            .unwrap()
            .build()
    }

    #[test]
    fn fresh_fragment() {
        let b = ballot(&["Alice", "Bob/PartyX/2"]);
        let expected = "<div id=\"stv_choices\">\n\
<ul id=\"stv_choices_available\" class=\"stv-toplevel\">\n\
<li class=\"preference\" data-index=\"1\" data-name=\"Alice\">1 - Alice</li>\n\
<li class=\"gvt\" data-name=\"PartyX\"><div class=\"gvt-name\">PartyX</div>\n\
<ul class=\"gvt-preferences\" data-put=\"true\">\n\
<li class=\"preference\" data-index=\"2\" data-name=\"Bob\" data-gvt=\"PartyX\">2 - Bob</li>\n\
</ul></li>\n\
</ul>\n\
<ul id=\"stv_choices_selected\" class=\"stv-toplevel\">\n\
</ul>\n\
</div>\n\
<input type=\"hidden\" id=\"stv_answer\" name=\"stv_answer\" value=\"\">\n";
        assert_eq!(render_fragment(&b), expected);
    }

    #[test]
    fn names_are_escaped() {
        let b = ballot(&["<i>Eve & \"Co\""]);
        let html = render_fragment(&b);
        assert!(html.contains("data-name=\"&lt;i&gt;Eve &amp; &quot;Co&quot;\""));
        assert!(!html.contains("<i>Eve"));
    }

    #[test]
    fn view_follows_moves() {
        let mut b = ballot(&["Alice", "Bob/PartyX/2", "Carol/PartyX/1"]);
        let gid = b.group_id("PartyX").unwrap();
        let mut view = HtmlView::default();
        perform_drag(
            &mut b,
            Move {
                item: ItemRef::Candidate(1),
                to: ListId::Chosen,
                position: 0,
            },
            &mut view,
        )
        .unwrap();
        assert_eq!(view.answer, "2");
        assert!(view.fragment.contains(">2 - Bob (PartyX)</li>"));
        assert!(view.fragment.contains("value=\"2\""));

        // Locked while a block is carried.
        crate::cancel_drag(&mut b, ItemRef::Group(gid), &mut view).unwrap();
        assert!(view.fragment.contains("data-put=\"false\""));
    }
}
