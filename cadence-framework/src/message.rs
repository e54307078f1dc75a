/// Where an inbound message arrived from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChannelKind {
    /// A regular text channel.
    Text,
    /// A one-on-one direct message.
    Dm,
    /// A group direct message.
    Group,
}

/// Platform-agnostic inbound chat message. The platform connection adapts
/// its native event type into this before handing it to the framework.
#[derive(Debug, Clone)]
pub struct Message {
    pub author_id: String,
    pub author_is_bot: bool,
    pub channel: String,
    pub channel_kind: ChannelKind,
    pub content: String,
}

impl Message {
    pub fn new(
        author_id: impl Into<String>,
        channel: impl Into<String>,
        content: impl Into<String>,
    ) -> Self {
        Self {
            author_id: author_id.into(),
            author_is_bot: false,
            channel: channel.into(),
            channel_kind: ChannelKind::Text,
            content: content.into(),
        }
    }

    pub fn from_bot(mut self) -> Self {
        self.author_is_bot = true;
        self
    }

    pub fn in_kind(mut self, kind: ChannelKind) -> Self {
        self.channel_kind = kind;
        self
    }
}
