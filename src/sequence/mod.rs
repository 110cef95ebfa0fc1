pub(crate) mod ease;
pub(crate) mod pulse;
pub(crate) mod script;
pub(crate) mod sequencer;
pub(crate) mod stage;
pub(crate) mod timer;
