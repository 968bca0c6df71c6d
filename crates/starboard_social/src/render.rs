//! Star post rendering.

use derive_getters::Getters;
use serenity::all as discord;
use starboard_core::StarPost;

const DESCRIPTION_LIMIT: usize = 4096;
const IMAGE_EXTENSIONS: [&str; 5] = ["png", "jpg", "jpeg", "gif", "webp"];

/// Embed shown under the header line of a star post.
#[derive(Debug, Clone, PartialEq, Eq, Getters)]
pub struct PostEmbed {
    author_name: String,
    author_avatar: String,
    description: String,
    image: Option<String>,
    jump_url: String,
}

impl PostEmbed {
    /// Describe `source` for the star post `post`.
    pub fn from_message(post: &StarPost, source: &discord::Message) -> Self {
        let image = source
            .attachments
            .iter()
            .find(|attachment| {
                is_image(&attachment.filename, attachment.content_type.as_deref())
            })
            .map(|attachment| attachment.url.clone());

        Self::new(
            source.author.name.clone(),
            source.author.face(),
            &source.content,
            image,
            post.jump_url(),
        )
    }

    /// Assemble an embed from already extracted parts.
    ///
    /// Descriptions longer than Discord allows are cut at a character boundary.
    pub fn new(
        author_name: String,
        author_avatar: String,
        content: &str,
        image: Option<String>,
        jump_url: String,
    ) -> Self {
        Self {
            author_name,
            author_avatar,
            description: content.chars().take(DESCRIPTION_LIMIT).collect(),
            image,
            jump_url,
        }
    }

    /// Serenity builder for this embed.
    pub fn to_builder(&self) -> discord::CreateEmbed {
        let mut embed = discord::CreateEmbed::new()
            .author(discord::CreateEmbedAuthor::new(&self.author_name).icon_url(&self.author_avatar))
            .field("Source", format!("[Jump to message]({})", self.jump_url), false);

        if !self.description.is_empty() {
            embed = embed.description(&self.description);
        }
        if let Some(image) = &self.image {
            embed = embed.image(image);
        }
        embed
    }
}

fn is_image(filename: &str, content_type: Option<&str>) -> bool {
    if let Some(content_type) = content_type {
        return content_type.starts_with("image/");
    }
    filename
        .rsplit_once('.')
        .is_some_and(|(_, ext)| IMAGE_EXTENSIONS.contains(&ext.to_ascii_lowercase().as_str()))
}

/// Message builder for a new star post.
pub(crate) fn create_message(post: &StarPost, embed: &PostEmbed) -> discord::CreateMessage {
    discord::CreateMessage::new()
        .content(post.header())
        .embed(embed.to_builder())
}

/// Edit that refreshes only the header line.
pub(crate) fn edit_message(post: &StarPost) -> discord::EditMessage {
    discord::EditMessage::new().content(post.header())
}
