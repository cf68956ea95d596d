// src/facts/builtin.rs

/// (category, content) pairs shown when no search result is active
pub const BUILTIN_FACTS: &[(&str, &str)] = &[
    (
        "History",
        "The Great Wall of China is not visible from space with the naked eye.",
    ),
    (
        "History",
        "Honey never spoils. Archaeologists have found pots of honey in ancient Egyptian tombs that are over 3,000 years old.",
    ),
    (
        "Space",
        "A day on Venus is longer than its year. It takes Venus 243 Earth days to rotate on its axis but only 225 Earth days to orbit the Sun.",
    ),
    (
        "Nature",
        "Octopuses have three hearts and blue blood.",
    ),
    (
        "Nature",
        "Bananas are berries, but strawberries are not.",
    ),
    (
        "Science",
        "Hot water can freeze faster than cold water under some conditions, a puzzle known as the Mpemba effect.",
    ),
    (
        "Space",
        "Neutron stars are so dense that a teaspoon of their material would weigh about a billion tonnes on Earth.",
    ),
    (
        "Animals",
        "Sea otters hold hands while they sleep so they do not drift apart.",
    ),
    (
        "Human Body",
        "Your stomach gets a new lining every few days so that it does not digest itself.",
    ),
    (
        "Geography",
        "Canada has more lakes than the rest of the world's countries combined.",
    ),
];
