//! Fixed prompt templates and filler text.

/// System instruction for the story writer.
pub const STORY_SYSTEM_INSTRUCTION: &str = "\
You are a creative children's story writer. Create engaging, magical, and age-appropriate stories
that are perfect for children aged 4-12.

Requirements:
1. Create exactly 8 parts for the story
2. Each part should be 2-4 sentences long
3. Use vivid, descriptive language that can be easily illustrated
4. Include magical elements and positive themes
5. Ensure a clear story arc with beginning, middle, and end
6. Make each part engaging and suitable for children
7. Use markdown formatting: ## for headers, **text** for bold emphasis
8. Each part should flow naturally to the next

The story should have:
- Interesting characters and adventures
- Educational and inspiring themes
- Vivid descriptions perfect for illustration
- A satisfying conclusion";

const STORY_PROMPT_TEMPLATE: &str = r###"Create a magical children's story based on this idea: {prompt}

CRITICAL: Return ONLY valid JSON. Do NOT use string concatenation with + operators.

Return your response as a valid JSON object with this exact structure:
{
    "title": "Story Title Here",
    "parts": [
        {"part_number": 1, "content": "## Part 1 Title\n\nStory content with **bold text** here. Keep each content as one continuous string without + operators."},
        {"part_number": 2, "content": "## Part 2 Title\n\nMore story content in one string..."},
        {"part_number": 3, "content": "## Part 3 Title\n\nContinue the story..."},
        {"part_number": 4, "content": "## Part 4 Title\n\nMiddle of the adventure..."},
        {"part_number": 5, "content": "## Part 5 Title\n\nBuilding to climax..."},
        {"part_number": 6, "content": "## Part 6 Title\n\nThe climax moment..."},
        {"part_number": 7, "content": "## Part 7 Title\n\nResolution begins..."},
        {"part_number": 8, "content": "## Part 8 Title\n\nHappy ending conclusion..."}
    ]
}

Requirements:
- Create exactly 8 parts as shown above
- Each content must be ONE continuous string (no + concatenation)
- Each part should be 2-4 sentences
- Use markdown: ## for headers, **text** for bold
- Make it engaging for children aged 4-12
- Each part should be descriptive for illustration
- Return ONLY the JSON, no extra text or markdown formatting"###;

const ILLUSTRATION_PROMPT_TEMPLATE: &str = "\
Create a beautiful, child-friendly illustration for part {part_number} of a children's story about {theme}.

Scene description: {scene}

Style requirements:
- Colorful and magical
- Suitable for children aged 4-12
- Warm and inviting atmosphere
- Digital art style with soft lighting
- Vibrant, cheerful colors
- High quality illustration
- Storybook illustration style

Make sure the image clearly represents the key elements and mood of this story part.";

/// Filler for parts the normalizer had to invent from missing paragraphs.
const FALLBACK_PART_TEMPLATE: &str = "## Part {part_number}\n\nThe adventure continues with magical surprises!";

/// Filler for parts the assembler appends when the story came up short.
const CONTINUATION_PART_TEMPLATE: &str = "## Part {part_number}\n\nAnd so the **magical adventure** continued with even more wonderful surprises ahead!";

/// Maximum number of characters of part text used as a scene description.
pub const SCENE_DESCRIPTION_LIMIT: usize = 300;

pub fn story_prompt(prompt: &str) -> String {
    STORY_PROMPT_TEMPLATE.replace("{prompt}", prompt)
}

pub fn illustration_prompt(part_number: u32, theme: &str, scene: &str) -> String {
    ILLUSTRATION_PROMPT_TEMPLATE
        .replace("{part_number}", &part_number.to_string())
        .replace("{theme}", theme)
        .replace("{scene}", scene)
}

pub fn fallback_part(part_number: u32) -> String {
    FALLBACK_PART_TEMPLATE.replace("{part_number}", &part_number.to_string())
}

pub fn continuation_part(part_number: u32) -> String {
    CONTINUATION_PART_TEMPLATE.replace("{part_number}", &part_number.to_string())
}

/// Strip markdown emphasis/header markers and keep a bounded prefix.
pub fn scene_description(text: &str) -> String {
    let cleaned: String = text.chars().filter(|c| !matches!(c, '#' | '*')).collect();
    cleaned
        .trim()
        .chars()
        .take(SCENE_DESCRIPTION_LIMIT)
        .collect()
}
