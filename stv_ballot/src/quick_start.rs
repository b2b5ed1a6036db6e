/*!

# Quick start with a scripted session

This example replays a voting session end to end from the command line.

Write the election in `board.json`:

```json
{
  "name": "Board election",
  "questions": [
    {"question": "Board members", "answers": ["Alice", "Bob/PartyX/2", "Carol/PartyX/1"]}
  ]
}
```

and what the voter does in `voter.json`:

```json
{"steps": [
  {"action": "show", "question": 0},
  {"action": "drag", "item": "Bob", "to": "chosen"},
  {"action": "drag", "item": "Alice", "to": "chosen"}
]}
```

Run:

```bash
stvbooth -e board.json -s voter.json --html ballot.html
```

The summary is printed on the standard output:

```text
{
  "answers": [
    {
      "answer": "2,1",
      "available": [
        "3 - Carol"
      ],
      "chosen": [
        "2 - Bob (PartyX)",
        "1 - Alice"
      ],
      "question": 0,
      "ranking": [
        "Bob",
        "Alice"
      ],
      "short_name": null
    }
  ],
  "election": "Board election"
}
```

Bob left the `PartyX` block, so he is shown with his ticket. Carol is still in
the block. `ballot.html` holds the markup of the last question shown.

Pass `--reference expected.json` to check the summary against a saved one,
and `--verbose` to follow every move in the logs.

*/
