//! Embed construction for item notifications.
//!
//! Builders are kept free of any gateway or HTTP state so the chunking and
//! text rules are directly testable.

use serenity::all::{Colour, CreateEmbed, CreateEmbedFooter};

use crate::archive::Item;

/// Discord caps a message at 10 embeds; one slot is reserved for the header.
pub const MAX_ITEMS_PER_MESSAGE: usize = 9;

pub const HEADER_TITLE: &str = "Recently added items in our Archive";

/// Partition items into consecutive chunks of at most
/// [`MAX_ITEMS_PER_MESSAGE`], preserving order. `ceil(len/9)` chunks.
#[must_use]
pub fn chunk_items(items: &[Item]) -> Vec<&[Item]> {
    items.chunks(MAX_ITEMS_PER_MESSAGE).collect()
}

/// Footer line for a chunk's header embed.
///
/// A single-message run reports the total count; a multi-message run
/// reports its position and the 1-based item range it covers.
#[must_use]
pub fn header_footer_text(
    chunk_index: usize,
    chunk_count: usize,
    chunk_start: usize,
    chunk_len: usize,
    total: usize,
) -> String {
    if chunk_count <= 1 {
        if total == 1 {
            "1 new item found".to_string()
        } else {
            format!("{total} new items found")
        }
    } else {
        format!(
            "Message {} of {} - Items {}-{} of {}",
            chunk_index + 1,
            chunk_count,
            chunk_start + 1,
            chunk_start + chunk_len,
            total
        )
    }
}

#[must_use]
pub fn build_header_embed(archive_base_url: &str, footer_text: &str) -> CreateEmbed {
    CreateEmbed::new()
        .title(HEADER_TITLE)
        .url(archive_base_url)
        .colour(Colour::BLUE)
        .footer(CreateEmbedFooter::new(footer_text))
}

/// One embed per item: linked title, truncated description, format string as
/// footer when present, thumbnail when present.
#[must_use]
pub fn build_item_embed(item: &Item, archive_base_url: &str) -> CreateEmbed {
    let mut embed = CreateEmbed::new()
        .title(item.display_title())
        .url(item.permalink(archive_base_url))
        .description(item.truncated_description())
        .colour(Colour::BLUE);

    if let Some(format_label) = item.format_label() {
        embed = embed.footer(CreateEmbedFooter::new(format_label));
    }
    if let Some(thumbnail) = item.thumbnail_url() {
        embed = embed.thumbnail(thumbnail);
    }
    embed
}

/// All embeds for one outbound message: the header followed by one embed per
/// item in the chunk. At most `1 + MAX_ITEMS_PER_MESSAGE` embeds.
#[must_use]
pub fn build_message_embeds(
    chunk: &[Item],
    chunk_index: usize,
    chunk_count: usize,
    total: usize,
    archive_base_url: &str,
) -> Vec<CreateEmbed> {
    let chunk_start = chunk_index * MAX_ITEMS_PER_MESSAGE;
    let footer = header_footer_text(chunk_index, chunk_count, chunk_start, chunk.len(), total);

    let mut embeds = Vec::with_capacity(chunk.len() + 1);
    embeds.push(build_header_embed(archive_base_url, &footer));
    embeds.extend(chunk.iter().map(|item| build_item_embed(item, archive_base_url)));
    embeds
}
