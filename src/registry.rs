//! Intent routing: the ordered trigger table.
//!
//! Routing is deterministic first-match-wins substring containment over an
//! explicit ordered list. Order is a correctness invariant, not a tuning
//! knob: overlapping triggers ("open google" vs "google") must be declared
//! narrow-before-broad or the narrow command is unreachable. For the same
//! reason this is a linear scan and must never be turned into a hash lookup.
//!
//! | Trigger | Intent |
//! |---------|--------|
//! | "open google" | `OpenBrowser` |
//! | "google" | `WebSearch` |
//! | "what day is it" | `DayOfWeek` |
//! | "what time is it" | `TimeOfDay` |
//! | "from wikipedia" | `Encyclopedia` |
//! | "who are you" | `Identity` |
//! | "make a note" | `TakeNote` |
//! | "open email" | `OpenEmail` |
//! | "set alarm for" | `SetAlarm` |
//! | "launch program" | `LaunchProgram` |
//! | "enable voice" | `EnableVoice` |
//! | "disable voice" | `DisableVoice` |
//! | "play" | `PlayMedia` |
//! | "help" | `Help` |
//! | "goodbye" | `Goodbye` |
//! | (no match) | `Chat` |

/// A named action the router can resolve an utterance to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Intent {
    /// Open the home page in a browser tab.
    OpenBrowser,
    /// Open a search-results page for the rest of the utterance.
    WebSearch,
    /// Answer with the current weekday.
    DayOfWeek,
    /// Answer with the current hour and minute.
    TimeOfDay,
    /// Fetch a one-sentence encyclopedia summary.
    Encyclopedia,
    /// Answer with the fixed identity string.
    Identity,
    /// Append the rest of the utterance to the note log.
    TakeNote,
    /// Open the webmail page.
    OpenEmail,
    /// Arm the alarm scheduler.
    SetAlarm,
    /// Launch a configured program by name.
    LaunchProgram,
    /// Switch the session to voice acquisition.
    EnableVoice,
    /// Switch the session to text acquisition.
    DisableVoice,
    /// Open a media file with the OS default handler.
    PlayMedia,
    /// Return the help text verbatim.
    Help,
    /// Begin the exit path.
    Goodbye,
    /// No trigger matched: forward to the dialogue engine.
    Chat,
}

/// One (trigger substring, intent) pair in the ordered table.
#[derive(Debug, Clone, Copy)]
pub struct TriggerEntry {
    /// Substring searched for in the normalized utterance.
    pub trigger: &'static str,
    /// Intent selected when the trigger is found.
    pub intent: Intent,
}

/// The ordered first-match-wins router.
#[derive(Debug, Clone)]
pub struct ActionRegistry {
    entries: Vec<TriggerEntry>,
}

impl ActionRegistry {
    /// The canonical trigger table.
    pub fn standard() -> Self {
        Self {
            entries: vec![
                // "open google" must precede "google" or it is unreachable.
                TriggerEntry { trigger: "open google", intent: Intent::OpenBrowser },
                TriggerEntry { trigger: "google", intent: Intent::WebSearch },
                TriggerEntry { trigger: "what day is it", intent: Intent::DayOfWeek },
                TriggerEntry { trigger: "what time is it", intent: Intent::TimeOfDay },
                TriggerEntry { trigger: "from wikipedia", intent: Intent::Encyclopedia },
                TriggerEntry { trigger: "who are you", intent: Intent::Identity },
                TriggerEntry { trigger: "make a note", intent: Intent::TakeNote },
                TriggerEntry { trigger: "open email", intent: Intent::OpenEmail },
                TriggerEntry { trigger: "set alarm for", intent: Intent::SetAlarm },
                TriggerEntry { trigger: "launch program", intent: Intent::LaunchProgram },
                TriggerEntry { trigger: "enable voice", intent: Intent::EnableVoice },
                TriggerEntry { trigger: "disable voice", intent: Intent::DisableVoice },
                // Bare word: any utterance containing "play" that survived the
                // ranks above dispatches here.
                TriggerEntry { trigger: "play", intent: Intent::PlayMedia },
                TriggerEntry { trigger: "help", intent: Intent::Help },
                TriggerEntry { trigger: "goodbye", intent: Intent::Goodbye },
            ],
        }
    }

    /// Resolve a normalized utterance to an intent.
    ///
    /// Scans the table in declaration order and commits to the first trigger
    /// whose substring occurs anywhere in the utterance; never backtracks.
    /// Falls back to [`Intent::Chat`] when nothing matches.
    pub fn resolve(&self, utterance: &str) -> Intent {
        self.entries
            .iter()
            .find(|entry| utterance.contains(entry.trigger))
            .map_or(Intent::Chat, |entry| entry.intent)
    }

    /// The table in declaration order.
    pub fn entries(&self) -> &[TriggerEntry] {
        &self.entries
    }
}

impl Default for ActionRegistry {
    fn default() -> Self {
        Self::standard()
    }
}
