/// System context every assistant request carries.
const FLOOD_CONTEXT: &str = "You are an expert AI assistant specializing in flood risk assessment and disaster management for Northern Namibia. \
You have access to geospatial data about flood zones, population centers, river monitoring stations, and weather patterns. \
Provide helpful, accurate information about flood risks, preparedness, and response strategies.";

/// Wrap the raw user query in the flood-domain context.
pub fn build_assistant_prompt(query: &str) -> String {
    format!("{FLOOD_CONTEXT}\n\nUser query: {query}")
}
