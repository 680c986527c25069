//! Career-guidance prompt with the whole document inlined.

/// Builds the document-context prompt.
///
/// `document` is inserted verbatim, no chunking or trimming.
pub fn career_prompt(document: &str, user_message: &str) -> String {
    format!(
        "You are a career guidance assistant. You will be provided with a list of career profiles, each containing a title and a description.\n\
\n\
Your task is to help users find suitable career options based on their interests and skills. When a user provides their interests or skills, identify and list the careers that align with the provided information. If no matching careers are found, respond with, \"I couldn't find any careers matching your interests and skills.\"\n\
\n\
Here is the list of career profiles:\n\
\n\
{document}\n\
\n\
User's interests and skills: {user_message}"
    )
}
