use crate::utils::error::Result;
use async_trait::async_trait;
use std::collections::VecDeque;
use tokio::io::{AsyncBufReadExt, BufReader, Lines, Stdin};

/// 客戶回答的來源。回傳 `None` 代表這一輪沒有聽到任何內容。
#[async_trait]
pub trait Listener: Send {
    async fn listen(&mut self) -> Result<Option<String>>;
}

/// 事先寫好的回答，用完之後一律視為沉默
#[derive(Debug, Default)]
pub struct ScriptedListener {
    replies: VecDeque<String>,
}

impl ScriptedListener {
    pub fn new<I, S>(replies: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            replies: replies.into_iter().map(Into::into).collect(),
        }
    }
}

#[async_trait]
impl Listener for ScriptedListener {
    async fn listen(&mut self) -> Result<Option<String>> {
        Ok(self
            .replies
            .pop_front()
            .filter(|reply| !reply.trim().is_empty()))
    }
}

/// 從標準輸入逐行讀取
pub struct StdinListener {
    lines: Lines<BufReader<Stdin>>,
}

impl StdinListener {
    pub fn new() -> Self {
        Self {
            lines: BufReader::new(tokio::io::stdin()).lines(),
        }
    }
}

impl Default for StdinListener {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl Listener for StdinListener {
    async fn listen(&mut self) -> Result<Option<String>> {
        let line = self.lines.next_line().await?;
        Ok(line.filter(|l| !l.trim().is_empty()))
    }
}
