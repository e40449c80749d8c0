// Fixed instruction text for cover letter composition.
// Section order in the final prompt is owned by composer.rs.

pub const VERIFIED_INFORMATION_HEADING: &str = "VERIFIED INFORMATION:";

pub const TONE_AND_STYLE_HEADING: &str = "TONE AND STYLE GUIDELINES:";

/// Company directives when a researched company fact is present.
pub const COMPANY_DIRECTIVES_WITH_RESEARCH: &str = "\
- When referencing company information, use ONLY facts from the company research above
- Do not fabricate or assume additional company information
- Reference at most one recent company development or news item
- Focus on matching your experience to the company's verified focus areas";

/// Company directives when no researched company fact is present.
pub const COMPANY_DIRECTIVES_WITHOUT_RESEARCH: &str = "\
- No verified company information is available
- Do not state any company-specific facts, values, products or news
- Refer to the company only by name";

pub const REQUIRED_FORMAT: &str = "\
REQUIRED FORMAT:
Note: Do not include any address or greeting - these will be added automatically.
1. First paragraph (at most 3 sentences): Briefly introduce your educational background and ONE specific reason for interest in the role
2. Body paragraphs (2-3 paragraphs, each 3-4 sentences): Focus on your most relevant experiences that match the job requirements
3. Final paragraph (at most 3 sentences): Summarize your key qualifications that match the role requirements
Maximum 5 paragraphs total.";

pub const STRICT_RULES: &str = "\
STRICT RULES:
1. Use only the verified information above; do not invent experience, skills, employers or credentials
2. Focus only on experiences and skills that directly match the job requirements
3. Do not use any generic enthusiasm or filler phrases
4. End with concrete qualifications, not expressions of interest
5. Do not repeat information between paragraphs
6. Do not make assumptions about the company beyond the verified information
7. Do not include any contact information or signature - this will be added automatically";

pub const FORBIDDEN_CONTENT: &str = "\
FORBIDDEN PHRASES AND CONTENT:
- Any expression of excitement or eagerness
- Future speculations about the company
- Unverified company information
- Generic industry trends
- Market predictions or analysis
- References to news not included in the verified information
- Generic phrases about company reputation
- Vague statements about company culture
- Personal opinions about the company's status or future";

pub const CLOSING_INSTRUCTION: &str = "[Write a focused, specific cover letter that demonstrates \
concrete qualifications while maintaining the specified tone and style.]";
