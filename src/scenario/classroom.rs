//! Built-in classroom prompts

/// Scenarios set in and around a school, suitable for a class to act out
pub const SCENARIOS: [&str; 100] = [
    "The class feels sick after eating in the cafeteria.",
    "A huge dragon lands in the schoolyard.",
    "Santa Claus suddenly appears in the classroom.",
    "The grumpy teacher discovers his coffee has been spilled.",
    "A nervous substitute starts their very first lesson.",
    "The fire alarm goes off in the middle of an important test.",
    "A student shouts that there is a spider in the classroom.",
    "The principal walks into the lesson unannounced.",
    "The class finds out that gym is outside in the rain.",
    "A ball smashes a window in the schoolyard.",
    "The class finds a mysterious box in front of the door.",
    "A student claims their backpack is moving.",
    "A famous football player visits the school.",
    "A classmate has forgotten all their gym clothes.",
    "The class finds out they have a new super strict teacher.",
    "Something smells really strange in the classroom.",
    "A student has brought their little brother to school.",
    "The class wins a giant trophy.",
    "A teacher suddenly starts dancing.",
    "The class realises they got on the wrong bus.",
    "The whole school loses power.",
    "A student drops their entire lunch on the floor.",
    "The class meets a very strict school inspector.",
    "There is snow all over the classroom.",
    "A dog runs into the schoolyard.",
    "The class realises they left their teacher behind on the field trip.",
    "A student says there is a snake in the bushes.",
    "The class suddenly has to perform in front of the whole school.",
    "A teacher cannot find their glasses.",
    "There is only one chair left in the classroom.",
    "The class finds out they have double homework.",
    "A balloon pops in the middle of the lesson.",
    "The school kitchen is full of smoke.",
    "The class finds a treasure chest on the playground.",
    "A student has dyed their hair completely green.",
    "A very angry parent is standing in the doorway.",
    "The class sees a meteor in the sky.",
    "A teacher cries over a broken mug.",
    "The class finds out they have tests all week.",
    "A student has brought a giant ice cream to school.",
    "There is a magician in the classroom.",
    "The class discovers the floor is completely wet.",
    "A student dramatically falls off their chair.",
    "The class finds a secret door behind the bookshelf.",
    "A teacher loses their patience.",
    "The class realises they are locked out.",
    "A student claims they have seen an alien.",
    "The whole class is told to tidy up right now.",
    "A robot walks into the classroom.",
    "The class finds out they have won a competition.",
    "A teacher trips over a bag.",
    "The class discovers it is everyone's birthday today.",
    "There is a cat sitting on the teacher's chair.",
    "A student forgot to write their name on the test.",
    "The class finds out they are going to camp tomorrow.",
    "A very tired teacher tries to teach.",
    "The class realises they are the only ones at school.",
    "A student arrives late with a wild excuse.",
    "There is confetti all over the floor.",
    "The class discovers someone ate the teacher's cake.",
    "A student has built a tower that is about to fall over.",
    "The class finds out they each have to sing a solo.",
    "A very strict judge is standing in the doorway.",
    "A drone lands in the schoolyard.",
    "The class realises they forgot about sports day.",
    "A student has painted on the blackboard.",
    "The class finds out they have a class mascot.",
    "A teacher drops all of their papers.",
    "The class finds out they will have a substitute for the rest of the year.",
    "A student has brought a gigantic cake.",
    "The whole class gets the hiccups at the same time.",
    "A very grumpy caretaker finds a mess in the hallway.",
    "The class has to clean up the entire schoolyard.",
    "A student hides under the desk.",
    "A note on the wall says \"The principal wants to talk to you\".",
    "The class finds out they are going to be on TV.",
    "A teacher tries to be cool.",
    "The class discovers the classrooms have been swapped.",
    "A student has brought their hamster.",
    "The class realises they forgot their packed lunches at home.",
    "A huge downpour starts in the middle of recess.",
    "The class finds out they have a new classmate.",
    "A student knocks a glass of water over the computer.",
    "The class finds out they have to run 5 km in gym.",
    "A very cheerful teacher hands out grades.",
    "The class finds out they have maths for four hours.",
    "A student has brought a speaker and plays music.",
    "The class discovers a secret message on the blackboard.",
    "A teacher whispers something very serious.",
    "The class realises it is the last school day before the holidays.",
    "A student claims the school is haunted.",
    "The class discovers their classroom has been painted a wild colour.",
    "A teacher is startled by a loud noise.",
    "The class realises they forgot their project at home.",
    "A student has drawn a giant picture on the blackboard.",
    "The class finds out they will have guests during the lesson.",
    "A very dramatic apology is made in the middle of class.",
    "The class has to do group work with their \"opposite\".",
    "One student cheers while everyone else looks shocked.",
    "The class discovers the final bell has already rung.",
];
