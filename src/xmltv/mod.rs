//! XMLTV document generation
//!
//! Turns a merged [`ListingsPayload`] into an XMLTV document. Channels are
//! written in natural `channelId` order, followed by every programme grouped
//! by channel in the same order and sorted by start time. Generation is a
//! single synchronous pass and never fails; optional fields that are absent
//! or unparseable simply omit their element.

use chrono::Datelike;
use tracing::debug;

pub mod episode;

pub use episode::{EpisodeNum, EpisodeSystem, dd_progid, episode_numbers};

use crate::config::defaults::{DEFAULT_GENERATOR_NAME, DEFAULT_GENERATOR_URL};
use crate::models::{Channel, Event, EventFlag, EventTag, ListingsPayload};
use crate::utils::natural_cmp;
use crate::utils::time::{
    LISTINGS_TIMEZONE, civil_date_in_zone, format_air_date, format_xmltv_timestamp,
    parse_instant,
};
use crate::utils::url::UrlUtils;
use crate::utils::xml::escape_xml;

const SERIES_OVERVIEW_URL: &str = "https://tvlistings.gracenote.com//overview.html";

/// Options controlling XMLTV output
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct XmltvOptions {
    /// Append ` *` to the title of new or live airings
    pub append_asterisk: bool,
    /// Place the `xmltv_ns` episode number first
    pub prioritize_xmltv_ns: bool,
    pub generator_name: String,
    pub generator_url: String,
}

impl Default for XmltvOptions {
    fn default() -> Self {
        Self {
            append_asterisk: false,
            prioritize_xmltv_ns: false,
            generator_name: DEFAULT_GENERATOR_NAME.to_string(),
            generator_url: DEFAULT_GENERATOR_URL.to_string(),
        }
    }
}

/// XMLTV generator
#[derive(Debug, Clone, Default)]
pub struct XmltvGenerator {
    options: XmltvOptions,
}

impl XmltvGenerator {
    pub fn new(options: XmltvOptions) -> Self {
        Self { options }
    }

    /// Generate the complete XMLTV document
    pub fn generate(&self, payload: &ListingsPayload) -> String {
        let channels = sorted_channels(payload);

        let mut xmltv = String::new();
        xmltv.push_str("<?xml version=\"1.0\" encoding=\"UTF-8\"?>\n");
        xmltv.push_str(&format!(
            "<tv generator-info-name=\"{}\" generator-info-url=\"{}\">\n",
            escape_xml(&self.options.generator_name),
            escape_xml(&self.options.generator_url)
        ));

        for channel in &channels {
            self.write_channel(&mut xmltv, channel);
        }

        let mut programme_count = 0;
        for channel in &channels {
            for event in sorted_events(channel) {
                self.write_programme(&mut xmltv, channel, event);
                programme_count += 1;
            }
        }

        xmltv.push_str("</tv>\n");

        debug!(
            "Generated XMLTV with {} channels and {} programmes",
            channels.len(),
            programme_count
        );
        xmltv
    }

    fn write_channel(&self, xmltv: &mut String, channel: &Channel) {
        xmltv.push_str(&format!(
            "  <channel id=\"{}\">\n",
            escape_xml(&channel.channel_id)
        ));
        push_text_element(xmltv, "display-name", &channel.call_sign);

        if let Some(channel_no) = &channel.channel_no {
            push_text_element(
                xmltv,
                "display-name",
                &format!("{} {}", channel_no, channel.call_sign),
            );
        }
        if let Some(affiliate_name) = &channel.affiliate_name {
            push_text_element(xmltv, "display-name", affiliate_name);
        }
        if let Some(channel_no) = &channel.channel_no {
            push_text_element(xmltv, "display-name", channel_no);
        }
        if let Some(thumbnail) = &channel.thumbnail {
            xmltv.push_str(&format!(
                "    <icon src=\"{}\" />\n",
                escape_xml(&UrlUtils::channel_icon_src(thumbnail))
            ));
        }

        xmltv.push_str("  </channel>\n");
    }

    fn write_programme(&self, xmltv: &mut String, channel: &Channel, event: &Event) {
        let program = &event.program;
        let start = event.start_instant();
        let is_new = event.has_flag(EventFlag::New);
        let is_live = event.has_flag(EventFlag::Live);

        xmltv.push_str(&format!(
            "  <programme start=\"{}\" stop=\"{}\" channel=\"{}\">\n",
            format_xmltv_timestamp(start),
            format_xmltv_timestamp(event.end_instant()),
            escape_xml(&channel.channel_id)
        ));

        let mut title = program.title.clone();
        if self.options.append_asterisk && (is_new || is_live) {
            title.push_str(" *");
        }
        push_text_element(xmltv, "title", &title);

        if let Some(episode_title) = &program.episode_title {
            push_text_element(xmltv, "sub-title", episode_title);
        }
        if let Some(short_desc) = &program.short_desc {
            push_text_element(xmltv, "desc", short_desc);
        }

        match &program.release_year {
            Some(release_year) => push_text_element(xmltv, "date", release_year),
            None => {
                let date = civil_date_in_zone(start, LISTINGS_TIMEZONE);
                xmltv.push_str(&format!(
                    "    <date>{:04}{:02}{:02}</date>\n",
                    date.year(),
                    date.month(),
                    date.day()
                ));
            }
        }

        for genre in &program.genres {
            xmltv.push_str(&format!(
                "    <category lang=\"en\">{}</category>\n",
                escape_xml(&capitalize(genre))
            ));
        }

        if let Some(duration) = &event.duration {
            xmltv.push_str(&format!(
                "    <length units=\"minutes\">{}</length>\n",
                escape_xml(duration)
            ));
        }

        if let Some(thumbnail) = &event.thumbnail {
            xmltv.push_str(&format!(
                "    <icon src=\"{}\" />\n",
                escape_xml(&UrlUtils::program_icon_src(thumbnail))
            ));
        }

        if let (Some(series_id), Some(tms_id)) = (&program.series_id, &program.tms_id) {
            xmltv.push_str(&format!(
                "    <url>{}?programSeriesId={}&amp;tmsId={}</url>\n",
                SERIES_OVERVIEW_URL,
                escape_xml(series_id),
                escape_xml(tms_id)
            ));
        }

        for number in episode_numbers(event, self.options.prioritize_xmltv_ns) {
            xmltv.push_str(&format!(
                "    <episode-num system=\"{}\">{}</episode-num>\n",
                number.system,
                escape_xml(&number.value)
            ));
        }

        let air_date = program
            .episode_air_date
            .as_deref()
            .or(program.original_air_date.as_deref())
            .and_then(parse_instant);
        if let Some(air_date) = air_date {
            xmltv.push_str(&format!(
                "    <episode-num system=\"original-air-date\">{}</episode-num>\n",
                format_air_date(air_date)
            ));
        }

        let flag_elements = [
            (EventFlag::New, "new"),
            (EventFlag::Live, "live"),
            (EventFlag::Premiere, "premiere"),
            (EventFlag::Finale, "last-chance"),
        ];
        for (flag, element) in flag_elements {
            if event.has_flag(flag) {
                xmltv.push_str(&format!("    <{element} />\n"));
            }
        }

        if !is_new && !is_live && is_rerun_candidate(&program.id) {
            match &program.original_air_date {
                Some(original_air_date) => xmltv.push_str(&format!(
                    "    <previously-shown start=\"{}000000\" />\n",
                    escape_xml(&original_air_date.replace('-', ""))
                )),
                None => xmltv.push_str("    <previously-shown />\n"),
            }
        }

        if event.has_tag(EventTag::Stereo) {
            xmltv.push_str("    <audio type=\"stereo\" />\n");
        }
        if event.has_tag(EventTag::ClosedCaptions) {
            xmltv.push_str("    <subtitles type=\"teletext\" />\n");
        }

        if let Some(rating) = &event.rating {
            xmltv.push_str(&format!(
                "    <rating system=\"MPAA\"><value>{}</value></rating>\n",
                escape_xml(rating)
            ));
        }

        xmltv.push_str("  </programme>\n");
    }
}

/// Generate an XMLTV document with the given options
pub fn generate_xmltv(payload: &ListingsPayload, options: &XmltvOptions) -> String {
    XmltvGenerator::new(options.clone()).generate(payload)
}

fn push_text_element(xmltv: &mut String, name: &str, text: &str) {
    xmltv.push_str(&format!("    <{name}>{}</{name}>\n", escape_xml(text)));
}

fn sorted_channels(payload: &ListingsPayload) -> Vec<&Channel> {
    let mut channels: Vec<&Channel> = payload.channels().collect();
    channels.sort_by(|a, b| natural_cmp(&a.channel_id, &b.channel_id));
    channels
}

/// Events ordered by start instant; ties keep their merge order
fn sorted_events(channel: &Channel) -> Vec<&Event> {
    let mut events: Vec<&Event> = channel.events.iter().collect();
    events.sort_by_key(|event| event.start_instant());
    events
}

/// Upper-case the first character
fn capitalize(value: &str) -> String {
    let mut chars = value.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

/// Episodes, shows and numeric ids may be reruns
fn is_rerun_candidate(program_id: &str) -> bool {
    program_id.starts_with("EP")
        || program_id.starts_with("SH")
        || program_id.starts_with(|c: char| c.is_ascii_digit())
}
