/// A titled article shown in the sidebar and main content panel.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct Document {
    pub title: &'static str,
    pub contents: &'static str,
}

static DOCUMENTS: [Document; 5] = [
    Document {
        title: "Squirrels",
        contents: "The Secret Life of Squirrels: Nature's Clever Acrobats\n\
Squirrels are often overlooked creatures, dismissed as mere park inhabitants or backyard nuisances. \
Yet, beneath their fluffy tails and twitching noses lies an intricate world of cunning, agility, and \
survival tactics that are nothing short of fascinating. As one of the most common mammals in North \
America, squirrels have adapted to a wide range of environments from bustling urban centers to \
tranquil forests and have developed a variety of unique behaviors that continue to intrigue \
scientists and nature enthusiasts alike.\n\
\n\
Master Tree Climbers\n\
At the heart of a squirrel's skill set is its impressive ability to navigate trees with ease. Whether \
they're darting from branch to branch or leaping across wide gaps, squirrels possess an innate \
talent for acrobatics. Their powerful hind legs, which are longer than their front legs, give them \
remarkable jumping power. With a tail that acts as a counterbalance, squirrels can leap distances of \
up to ten times the length of their body, making them some of the best aerial acrobats in the \
animal kingdom.\n\
But it's not just their agility that makes them exceptional climbers. Squirrels' sharp, curved \
claws allow them to grip tree bark with precision, while the soft pads on their feet provide \
traction on slippery surfaces. Their ability to run at high speeds and scale vertical trunks with \
ease is a testament to the evolutionary adaptations that have made them so successful in their \
arboreal habitats.\n\
\n\
Food Hoarders Extraordinaire\n\
Squirrels are often seen frantically gathering nuts, seeds, and even fungi in preparation for \
winter. While this behavior may seem like instinctual hoarding, it is actually a survival strategy \
that has been honed over millions of years. Known as \"scatter hoarding,\" squirrels store their \
food in a variety of hidden locations, often burying it deep in the soil or stashing it in \
hollowed-out tree trunks.\n\
Interestingly, squirrels have an incredible memory for the locations of their caches. Research has \
shown that they can remember thousands of hiding spots, often returning to them months later when \
food is scarce. However, they don't always recover every stash. Some forgotten caches eventually \
sprout into new trees, contributing to forest regeneration. This unintentional role as forest \
gardeners highlights the ecological importance of squirrels in their ecosystems.",
    },
    Document {
        title: "Lorem Ipsum",
        contents: "Lorem ipsum dolor sit amet, consectetur adipiscing elit, sed do eiusmod tempor \
incididunt ut labore et dolore magna aliqua. Ut enim ad minim veniam, quis nostrud exercitation \
ullamco laboris nisi ut aliquip ex ea commodo consequat. Duis aute irure dolor in reprehenderit in \
voluptate velit esse cillum dolore eu fugiat nulla pariatur. Excepteur sint occaecat cupidatat non \
proident, sunt in culpa qui officia deserunt mollit anim id est laborum.",
    },
    Document {
        title: "Vacuum Instructions",
        contents: "Chapter 3: Getting Started - Unpacking and Setup\n\
\n\
Congratulations on your new SuperClean Pro 5000 vacuum cleaner! In this section, we will guide you \
through the simple steps to get your vacuum up and running. Before you begin, please ensure that \
you have all the components listed in the \"Package Contents\" section on page 2.\n\
\n\
1. Unboxing Your Vacuum\n\
Carefully remove the vacuum cleaner from the box. Avoid using sharp objects that could damage the \
product. Once removed, place the unit on a flat, stable surface to proceed with the setup. Inside, \
you should find:\n\
\n\
    The main vacuum unit\n\
    A telescoping extension wand\n\
    A set of specialized cleaning tools (crevice tool, upholstery brush, etc.)\n\
    A reusable dust bag (if applicable)\n\
    A power cord with a 3-prong plug\n\
    A set of quick-start instructions\n\
\n\
2. Assembling Your Vacuum\n\
Begin by attaching the extension wand to the main body of the vacuum cleaner. Line up the \
connectors and twist the wand into place until you hear a click. Next, select the desired cleaning \
tool and firmly attach it to the wand's end, ensuring it is securely locked in.\n\
\n\
For models that require a dust bag, slide the bag into the compartment at the back of the vacuum, \
making sure it is properly aligned with the internal mechanism. If your vacuum uses a bagless \
system, ensure the dust container is correctly seated and locked in place before use.\n\
\n\
3. Powering On\n\
To start the vacuum, plug the power cord into a grounded electrical outlet. Once plugged in, \
locate the power switch, usually positioned on the side of the handle or body of the unit, \
depending on your model. Press the switch to turn the vacuum on. You should hear the motor start \
up, and the vacuum will be ready for use.",
    },
    Document {
        title: "Article 4",
        contents: "Article 4",
    },
    Document {
        title: "Article 5",
        contents: "Article 5",
    },
];

/// The fixed document set the demo browses.
pub fn documents() -> &'static [Document] {
    &DOCUMENTS
}
