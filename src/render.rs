//! Structured response view. Built once per submission and rendered as a
//! whole, so output never interleaves with a previous answer.

use crate::models::AnswerResponse;

#[derive(Debug, Clone, PartialEq)]
pub enum Block {
    Step { kind: String, content: String },
    FinalAnswer(String),
    /// Non-fatal remark shown after the answer (e.g. an unusable chart payload)
    Notice(String),
    Error(String),
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct ResponseView {
    blocks: Vec<Block>,
}

impl ResponseView {
    /// Step blocks in response order, then the final answer.
    pub fn from_answer(answer: &AnswerResponse) -> Self {
        let mut blocks: Vec<Block> = answer
            .steps
            .iter()
            .map(|s| Block::Step {
                kind: s.kind.clone(),
                content: s.content.clone(),
            })
            .collect();
        blocks.push(Block::FinalAnswer(answer.final_answer.clone()));
        Self { blocks }
    }

    /// A view holding only the error, replacing any answer.
    pub fn error(message: impl Into<String>) -> Self {
        Self {
            blocks: vec![Block::Error(message.into())],
        }
    }

    pub fn push_notice(&mut self, message: impl Into<String>) {
        self.blocks.push(Block::Notice(message.into()));
    }

    pub fn blocks(&self) -> &[Block] {
        &self.blocks
    }

    pub fn step_count(&self) -> usize {
        self.blocks
            .iter()
            .filter(|b| matches!(b, Block::Step { .. }))
            .count()
    }

    pub fn is_error(&self) -> bool {
        self.blocks.iter().any(|b| matches!(b, Block::Error(_)))
    }

    pub fn to_html(&self) -> String {
        let mut html = String::new();
        for block in &self.blocks {
            match block {
                Block::Step { kind, content } => {
                    html.push_str(&format!(
                        "<strong>{}:</strong><br>{}<br><br>",
                        escape_html(kind),
                        escape_html(content)
                    ));
                }
                Block::FinalAnswer(answer) => {
                    html.push_str(&format!(
                        "<hr><strong>Final Answer:</strong><br>{}",
                        escape_html(answer)
                    ));
                }
                Block::Notice(msg) => {
                    html.push_str(&format!("<br><em>{}</em>", escape_html(msg)));
                }
                Block::Error(msg) => {
                    html.push_str(&format!("Error: {}", escape_html(msg)));
                }
            }
        }
        html
    }

    pub fn to_text(&self) -> String {
        let mut parts = Vec::with_capacity(self.blocks.len());
        for block in &self.blocks {
            match block {
                Block::Step { kind, content } => parts.push(format!("{}:\n{}\n", kind, content)),
                Block::FinalAnswer(answer) => {
                    parts.push(format!("{}\nFinal Answer:\n{}", "-".repeat(40), answer))
                }
                Block::Notice(msg) => parts.push(format!("({})", msg)),
                Block::Error(msg) => parts.push(format!("Error: {}", msg)),
            }
        }
        parts.join("\n")
    }
}

pub fn escape_html(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
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
