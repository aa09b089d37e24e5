// src/view_lib/notice.rs

#[derive(Clone, Debug, PartialEq)]
pub struct Notice {
    pub text: String,
    pub remaining: f32,
}

/// Transient on-screen messages, newest last.
#[derive(Clone, Debug, Default)]
pub struct NoticeBoard {
    notices: Vec<Notice>,
}

const MAX_NOTICES: usize = 4;

impl NoticeBoard {
    pub fn push(&mut self, text: impl Into<String>, seconds: f32) {
        self.notices.push(Notice { text: text.into(), remaining: seconds });
        if self.notices.len() > MAX_NOTICES {
            self.notices.remove(0);
        }
    }

    pub fn tick(&mut self, dt: f32) {
        for notice in &mut self.notices {
            notice.remaining -= dt;
        }
        self.notices.retain(|n| n.remaining > 0.0);
    }

    pub fn iter(&self) -> impl Iterator<Item = &Notice> {
        self.notices.iter()
    }

    pub fn is_empty(&self) -> bool {
        self.notices.is_empty()
    }
}
