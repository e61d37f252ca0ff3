use crate::bank::QuestionAnswer;

/// What the overlay is showing while a card is open.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, strum_macros::Display)]
pub enum Reveal {
    #[default]
    Prompt,
    Answer,
}

/// A card's position in its reveal lifecycle. Only ever moves forward.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Stage {
    #[default]
    Initial,
    Question(Reveal),
    Answered,
}

impl Stage {
    /// Position in the Initial -> Question -> Answered order.
    pub fn rank(&self) -> u8 {
        match self {
            Stage::Initial => 0,
            Stage::Question(_) => 1,
            Stage::Answered => 2,
        }
    }

    pub fn is_question(&self) -> bool {
        matches!(self, Stage::Question(_))
    }
}

/// One grid position, dealt once per session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Card {
    id: usize,
    qa: QuestionAnswer,
    stage: Stage,
    flipped: bool,
}

impl Card {
    pub fn new(id: usize, qa: QuestionAnswer) -> Self {
        Self {
            id,
            qa,
            stage: Stage::Initial,
            flipped: false,
        }
    }

    pub fn id(&self) -> usize {
        self.id
    }

    pub fn qa(&self) -> &QuestionAnswer {
        &self.qa
    }

    pub fn question(&self) -> &str {
        &self.qa.question
    }

    pub fn answer(&self) -> &str {
        &self.qa.answer
    }

    pub fn stage(&self) -> Stage {
        self.stage
    }

    pub fn is_flipped(&self) -> bool {
        self.flipped
    }

    pub fn is_answered(&self) -> bool {
        self.stage == Stage::Answered
    }

    /// Initial -> Question(Prompt). Returns false if the card was already past Initial.
    pub(crate) fn open(&mut self) -> bool {
        if self.stage != Stage::Initial {
            return false;
        }
        self.stage = Stage::Question(Reveal::Prompt);
        self.flipped = true;
        true
    }

    /// Question(Prompt) -> Question(Answer).
    pub(crate) fn show_answer(&mut self) -> bool {
        if self.stage != Stage::Question(Reveal::Prompt) {
            return false;
        }
        self.stage = Stage::Question(Reveal::Answer);
        true
    }

    /// Question(_) -> Answered.
    pub(crate) fn finish(&mut self) -> bool {
        if !self.stage.is_question() {
            return false;
        }
        self.stage = Stage::Answered;
        self.flipped = false;
        true
    }
}
