//! Canned confessions and the selection channel
//!
//! A dropdown picks a confession; the input box should show it. The picker
//! and the inbox are the two ends of an owned channel, so the input side
//! reads selections when it is ready instead of watching shared state.

use std::sync::mpsc::{self, Receiver, Sender};

pub const VENIAL_SINS: [&str; 9] = [
    "I got a tattoo",
    "I was on my phone during Mass",
    "I got married in a Protestant chapel",
    "I got $150 in free Bonus Bets on Fan Duel",
    "I missed church to attend your funeral",
    "I parented my children too strictly",
    "I did not parent my children strictly enough",
    "I grabbed my dog by its hind legs and pushed it around like a vacuum cleaner",
    "I never got to say \"I love you\"",
];

pub const MORTAL_SINS: [&str; 8] = [
    "I actively harbor resentment toward the elderly",
    "I defrauded my local parish through a highly-complicated embezzlement scheme for my own personal enrichment",
    "I observed the Sabbath day on a Wednesday",
    "I used my $150 in free Bonus Bets on Fan Duel to participate in rigging the World Series",
    "I lied to the Pope about how I used my $150 in free bonus bets on Fan Duel",
    "I got baptized at 4 different churches and 2 different county jails",
    "I convinced my friend that there is a book in the Bible called \"Mitchell\"",
    "I defrauded my local parish through a highly-complicated embezzlement scheme for my own personal enrichment again",
];

/// Placeholder of the confession input.
pub const INPUT_PLACEHOLDER: &str = "What troubles you, my son...";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SinGrade {
    Venial,
    Mortal,
}

impl SinGrade {
    pub fn confessions(self) -> &'static [&'static str] {
        match self {
            SinGrade::Venial => &VENIAL_SINS,
            SinGrade::Mortal => &MORTAL_SINS,
        }
    }
}

/// Sending end, held by the dropdown.
#[derive(Debug, Clone)]
pub struct ConfessionPicker {
    tx: Sender<String>,
}

/// Receiving end, held by the input box.
#[derive(Debug)]
pub struct ConfessionInbox {
    rx: Receiver<String>,
}

/// Connected picker and inbox.
pub fn confession_channel() -> (ConfessionPicker, ConfessionInbox) {
    let (tx, rx) = mpsc::channel();
    (ConfessionPicker { tx }, ConfessionInbox { rx })
}

impl ConfessionPicker {
    /// Send free text. Returns `false` once the inbox is gone.
    pub fn select(&self, confession: impl Into<String>) -> bool {
        self.tx.send(confession.into()).is_ok()
    }

    /// Send entry `index` of the `grade` list. Returns `false` for an
    /// unknown index or a dropped inbox.
    pub fn pick(&self, grade: SinGrade, index: usize) -> bool {
        grade
            .confessions()
            .get(index)
            .is_some_and(|confession| self.select(*confession))
    }
}

impl ConfessionInbox {
    /// Most recent selection since the last call, discarding older ones.
    pub fn latest(&self) -> Option<String> {
        self.rx.try_iter().last()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_inbox_yields_latest() {
        let (picker, inbox) = confession_channel();
        assert_eq!(inbox.latest(), None);

        assert!(picker.pick(SinGrade::Venial, 0));
        assert!(picker.pick(SinGrade::Mortal, 2));
        assert_eq!(inbox.latest().as_deref(), Some("I observed the Sabbath day on a Wednesday"));
        assert_eq!(inbox.latest(), None);
    }

    #[test]
    fn test_pick_out_of_range() {
        let (picker, inbox) = confession_channel();
        assert!(!picker.pick(SinGrade::Mortal, MORTAL_SINS.len()));
        assert_eq!(inbox.latest(), None);
    }

    #[test]
    fn test_picker_from_another_thread() {
        let (picker, inbox) = confession_channel();
        std::thread::spawn(move || picker.select("I got a tattoo"))
            .join()
            .unwrap();
        assert_eq!(inbox.latest().as_deref(), Some("I got a tattoo"));
    }

    #[test]
    fn test_select_after_inbox_dropped() {
        let (picker, inbox) = confession_channel();
        drop(inbox);
        assert!(!picker.select("anything"));
    }
}
