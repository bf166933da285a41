//! The hero video modal and the testimonials video player.

use gallery_config::SiteConfig;
use std::time::Duration;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum VideoMessage {
    Open,
    Close,
    /// A `KeyboardEvent.key` value from the document
    Key(String),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VideoEffect {
    OpenModal { generation: u64 },
    CloseModal,
    LockScroll,
    UnlockScroll,
    /// Start playback after `after`, unless the modal left `generation` by then
    Play { after: Duration, generation: u64 },
    Pause,
    Rewind,
}

/// Hero video modal: opens with scroll locked and starts the video shortly
/// after; closing pauses and rewinds it.
#[derive(Debug, Clone)]
pub struct VideoModal {
    open: bool,
    generation: u64,
    play_delay: Duration,
}

impl VideoModal {
    pub fn new(config: &SiteConfig) -> Self {
        Self {
            open: false,
            generation: 0,
            play_delay: config.video_play_delay(),
        }
    }

    pub fn is_open(&self) -> bool {
        self.open
    }

    pub fn update(&mut self, message: VideoMessage) -> Vec<VideoEffect> {
        match message {
            VideoMessage::Open => self.open(),
            VideoMessage::Close => self.close(),
            VideoMessage::Key(key) if key == "Escape" => self.close(),
            VideoMessage::Key(_) => Vec::new(),
        }
    }

    fn open(&mut self) -> Vec<VideoEffect> {
        if self.open {
            return Vec::new();
        }

        self.open = true;
        self.generation = self.generation.wrapping_add(1);
        vec![
            VideoEffect::OpenModal {
                generation: self.generation,
            },
            VideoEffect::LockScroll,
            VideoEffect::Play {
                after: self.play_delay,
                generation: self.generation,
            },
        ]
    }

    fn close(&mut self) -> Vec<VideoEffect> {
        if !self.open {
            return Vec::new();
        }

        self.open = false;
        vec![
            VideoEffect::CloseModal,
            VideoEffect::UnlockScroll,
            VideoEffect::Pause,
            VideoEffect::Rewind,
        ]
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TestimonialMessage {
    Select(usize),
    /// The play/pause button
    TogglePlay,
    /// A click on the video itself
    VideoClick,
    Ended,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TestimonialEffect {
    /// Mark testimonial `n` active and every other one inactive
    Activate(usize),
    /// Point the player at a new video and reload it
    SetSource(String),
    /// Show the play overlay and the poster frame
    ShowControls,
    HideControls,
    Play,
    Pause,
}

/// Testimonial list driving a single phone-framed video player.
#[derive(Debug, Clone)]
pub struct TestimonialPlayer {
    /// `data-video` of each testimonial, in page order
    videos: Vec<Option<String>>,
    current: usize,
    playing: bool,
}

impl TestimonialPlayer {
    /// The first testimonial starts active and paused.
    pub fn new(videos: Vec<Option<String>>) -> Self {
        Self {
            videos,
            current: 0,
            playing: false,
        }
    }

    pub fn current(&self) -> usize {
        self.current
    }

    pub fn is_playing(&self) -> bool {
        self.playing
    }

    pub fn update(&mut self, message: TestimonialMessage) -> Vec<TestimonialEffect> {
        match message {
            TestimonialMessage::Select(idx) => self.select(idx),
            TestimonialMessage::TogglePlay if self.playing => self.pause(),
            TestimonialMessage::TogglePlay => {
                self.playing = true;
                vec![TestimonialEffect::HideControls, TestimonialEffect::Play]
            }
            TestimonialMessage::VideoClick if self.playing => self.pause(),
            TestimonialMessage::VideoClick => Vec::new(),
            TestimonialMessage::Ended => {
                self.playing = false;
                vec![TestimonialEffect::ShowControls]
            }
        }
    }

    fn select(&mut self, idx: usize) -> Vec<TestimonialEffect> {
        if idx == self.current {
            return Vec::new();
        }
        let Some(video) = self.videos.get(idx) else {
            tracing::debug!("ignoring unknown testimonial {idx}");
            return Vec::new();
        };

        let mut effects = vec![TestimonialEffect::Activate(idx)];
        // Items without a video only move the highlight
        if let Some(src) = video {
            effects.push(TestimonialEffect::SetSource(src.clone()));
            effects.push(TestimonialEffect::ShowControls);
            self.playing = false;
        }
        self.current = idx;
        effects
    }

    fn pause(&mut self) -> Vec<TestimonialEffect> {
        self.playing = false;
        vec![TestimonialEffect::Pause, TestimonialEffect::ShowControls]
    }
}
