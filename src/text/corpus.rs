//! Built-in training corpora for the Markov models
//!
//! The lore corpus carries the setting's voice; the name lists feed the
//! name synthesizer. All opaque text, never read back by simulation logic.

pub const FIRST_NAMES: &[&str] = &[
    "Mara", "Dov", "Iselle", "Calder", "Renna", "Joss", "Petra", "Hale",
];

pub const LAST_NAMES: &[&str] = &[
    "Voss", "Kessler", "Branagh", "Okafor", "Thale", "Duval", "Maren", "Stray",
];

pub const LORE_CORPUS: &str = "\
The convoy broke down for the last time on the ridge above the valley, and we decided the walking was over. \
Below us lay the bones of a town nobody had named in forty years, its roofs caved in, its streets silted with grey dust. \
We called the place Havenfall, half a hope and half a warning, and we began to dig in before the cold came. \
The old world left us its wreckage. Rusted cars line the dead highway like beads on a snapped string, and every one of them holds something, wire, cloth, a sealed tin, if you have the patience to pry. \
The scrap fields south of the ridge glitter on clear mornings. Tomas says the glitter is mostly glass, but glass has its uses too.

Food is the first worry and the last one. The berry thickets along the creek fruit twice a season, sour and small, and nobody complains. \
Fallen timber from the burn years is everywhere, dry and easy to haul, and the lean-to walls went up faster than anyone expected. \
At night the moss in the flooded quarry gives off a pale green light. The children say the quarry is breathing. The old ones say nothing at all.

There are places we do not go. The crater east of the waterworks clicks on the counter from fifty paces, and the ground there grows a grass no one can name, stiff as wire and the wrong shade of red. \
Something large moves in the pine stands after dark. We have seen the prints, three-toed, deep, unhurried. We keep the fires built up and we keep count of each other.

The question under every other question is what kind of people we intend to be. \
Some of us want walls first, stores first, rules first. Some want to share every tin and decide everything in the circle. \
A few have started leaving small offerings at the quarry rim, and they come back quieter than they went. \
We argue, we ration, we bury our dead on the ridge where the convoy stopped, and every grave faces the town we are building. \
Whatever we become, it begins here, in the dust, with our hands.";

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lore_corpus_is_trainable() {
        assert!(LORE_CORPUS.split_whitespace().count() >= 3);
        assert!(LORE_CORPUS.contains('.'));
    }

    #[test]
    fn test_name_lists_nonempty() {
        assert!(FIRST_NAMES.len() >= 3);
        assert!(LAST_NAMES.len() >= 3);
    }
}
